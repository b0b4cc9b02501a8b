//! Products API - REST server over PostgreSQL

use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting Products API"
    );

    // The listener is only bound once the pool is up and the schema is current
    let db = postgres::connect_with_retry(&config.postgres, RetryConfig::default()).await?;
    postgres::run_migrations::<migration::Migrator>(&db).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = api::app(&state)?;

    let db = state.db.clone();
    axum_helpers::create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        if let Err(e) = postgres::close(db).await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}

