//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Full application: API, docs, `/health` and `/ready`
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let health_routes =
        health_router(state.config.app.clone()).merge(health::router(state.clone()));

    create_router::<ApiDoc>(routes(state), health_routes, &state.config.server)
}
