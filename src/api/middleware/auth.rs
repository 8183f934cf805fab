//! Registry API key authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::api_key::Verification;

/// Extractor that requires a valid registry API key
///
/// Reads `Authorization: Bearer <key>` only. A header that is not valid
/// visible ASCII is treated the same as a missing one.
#[derive(Debug, Clone)]
pub struct RequirePublisher(pub Verification);

impl FromRequestParts<AppState> for RequirePublisher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verification = state
            .credential_verifier
            .verify(authorization_header(&parts.headers))
            .await?;

        Ok(RequirePublisher(verification))
    }
}

fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}
