//! HTTP middleware applied by [`crate::server::create_router`].

pub mod security;

pub use security::security_headers;
