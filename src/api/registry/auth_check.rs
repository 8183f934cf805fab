//! Registry API key check
//!
//! Lets registry clients confirm a key and learn which publisher it belongs to.

use axum::Json;

use crate::api::middleware::RequirePublisher;
use crate::api::types::AuthCheckResponse;

/// GET /api/registry/auth/check
pub async fn auth_check(
    RequirePublisher(verification): RequirePublisher,
) -> Json<AuthCheckResponse> {
    Json(AuthCheckResponse::authenticated(&verification.publisher))
}
