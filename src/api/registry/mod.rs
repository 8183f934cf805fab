//! Registry endpoints

pub mod auth_check;

use axum::{routing::get, Router};

use super::state::AppState;

/// Path of the authentication check, relative to the registry prefix
pub const AUTH_CHECK_PATH: &str = "/auth/check";

/// Create the registry router
pub fn create_registry_router() -> Router<AppState> {
    Router::new().route(AUTH_CHECK_PATH, get(auth_check::auth_check))
}
