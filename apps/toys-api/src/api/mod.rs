//! API routes module

pub mod health;
pub mod toys;

use axum::Router;
use axum_helpers::server::health_router;

use crate::state::AppState;

/// Create all API routes, at the root of the server
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(toys::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app))
}
