//! Request/response logging middleware with credential redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn};

const REDACTED: &str = "[REDACTED]";

/// Log each request and its outcome.
///
/// `TraceLayer` owns the request span, so this only emits events. Credential
/// headers are always redacted.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(request.headers());

    debug!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %redact_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Render the loggable headers, redacting sensitive values
fn redact_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                REDACTED
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check if a header contains sensitive information
fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "x-api-key" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

/// Check if a header should be logged
fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "accept"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "x-real-ip"
            | "authorization"
    )
}
