//! Page-number pagination translated into SQL `LIMIT`/`OFFSET`.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u64 = 25;

/// Upper bound on a single page.
pub const MAX_PER_PAGE: u64 = 10_000;

/// A 1-based page request. Zero values mean "not specified".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    page: u64,
    per_page: u64,
}

impl Pager {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(0),
            per_page: per_page.unwrap_or(0),
        }
    }

    pub fn limit(&self) -> u64 {
        if self.per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            self.per_page.min(MAX_PER_PAGE)
        }
    }

    pub fn offset(&self) -> u64 {
        if self.page == 0 {
            0
        } else {
            (self.page - 1) * self.limit()
        }
    }
}
