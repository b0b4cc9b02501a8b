use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, instrument};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Open a connection pool with the configured settings
pub async fn connect(config: &PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(config.clone().into_connect_options()).await?;
    info!(
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(db)
}

/// Connect, retrying with exponential backoff.
///
/// Callers treat the returned error as fatal: the service never starts
/// accepting traffic without a pool.
#[instrument(skip_all, fields(max_retries = retry.max_retries))]
pub async fn connect_with_retry(
    config: &PostgresConfig,
    retry: RetryConfig,
) -> DatabaseResult<DatabaseConnection> {
    let attempts = retry.attempts();

    retry_with_backoff(|| connect(config), retry)
        .await
        .map_err(|e| {
            error!(attempts, error = %e, "Could not connect to PostgreSQL");
            DatabaseError::ConnectionFailed {
                attempts,
                reason: e.to_string(),
            }
        })
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(db: &DatabaseConnection) -> DatabaseResult<()> {
    info!("Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed");
    Ok(())
}

/// Close the pool, waiting for checked-out connections to be returned
pub async fn close(db: DatabaseConnection) -> DatabaseResult<()> {
    db.close().await?;
    info!("PostgreSQL pool closed");
    Ok(())
}
