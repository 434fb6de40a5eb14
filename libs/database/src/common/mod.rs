//! Helpers that do not depend on a particular driver

pub mod error;
pub mod pagination;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Pager};
pub use retry::{RetryConfig, retry_with_backoff};
