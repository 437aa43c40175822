//! PostgreSQL connectivity for the workspace binaries.
//!
//! - `postgres` (default): SeaORM connection pool, retrying connect, health
//!   checks and a generic migration runner.
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`].
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "products_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
