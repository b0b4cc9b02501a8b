//! # Axum Helpers
//!
//! Shared HTTP plumbing for the services in this workspace.
//!
//! - **[`errors`]**: `AppError`, the `ErrorResponse` body and its error codes
//! - **[`http`]**: CORS and security header layers
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown

pub mod errors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use http::{cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};
