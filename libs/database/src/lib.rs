//! PostgreSQL connection lifecycle for the HTTP services
//!
//! Covers everything between `DATABASE_URL` and a ready `DatabaseConnection`:
//! pool configuration, connecting with bounded retries, running migrations,
//! readiness checks and closing the pool on shutdown.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config, RetryConfig::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db).await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
