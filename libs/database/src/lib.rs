//! PostgreSQL connectivity for the boardroom services.
//!
//! Wraps SeaORM connection setup with pool sizing taken from the resolved
//! [`core_config::Settings`], startup retries, migrations and a health probe.
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_settings(&settings)?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "boardroom_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
