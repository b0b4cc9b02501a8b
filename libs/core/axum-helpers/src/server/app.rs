use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{not_found, timeout_response};
use crate::http::{cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the service router around the API routes.
///
/// - `apis` nested under `/api` (state already applied by the caller)
/// - Swagger UI at `/swagger-ui`, document at `/api-docs/openapi.json`
/// - JSON 404 fallback
/// - `extra` routes (health and readiness) merged at the root, outside `/api`
/// - access log spans, security headers, CORS, request timeout (408) and
///   response compression, applied to every route above
///
/// # Errors
/// Fails when CORS cannot be configured, see [`cors_layer`].
pub fn create_router<T>(apis: Router, extra: Router, config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(config)?;

    // Deprecated in later 0.6 releases in favour of `with_status_code`; the
    // status is 408 either way and `timeout_response` fills in the body.
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(config.request_timeout);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .merge(extra)
        .fallback(not_found)
        .layer(timeout)
        .layer(middleware::map_response(timeout_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Bind `config.address()` and serve until SIGINT/SIGTERM, then run `cleanup`
/// bounded by `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.address()).await?;
    serve(
        listener,
        router,
        ShutdownCoordinator::new(),
        shutdown_timeout,
        cleanup,
    )
    .await
}

/// Serve on an already bound listener until `coordinator` trips.
///
/// In-flight requests drain first; `cleanup` runs afterwards so the pool
/// outlives every handler that might still use it.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Server listening on {}", listener.local_addr()?);

    let signal = coordinator.clone();
    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.listen().await })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server encountered an error"));

    info!(timeout = ?shutdown_timeout, "Running cleanup");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(timeout = ?shutdown_timeout, "Cleanup timed out, forcing shutdown"),
    }

    served
}
