//! PostgreSQL connectivity shared by the API and the test harness.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connection pool, migrations and health checks
//! - `config` (default) - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "lead_exchange_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult, Pager};
#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
