use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::registry;
use super::state::AppState;

/// Prefix under which the registry endpoints are mounted
pub const REGISTRY_PREFIX: &str = "/api/registry";

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Registry API
        .nest(REGISTRY_PREFIX, registry::create_registry_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
