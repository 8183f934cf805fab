//! Integration tests for the registry authentication check endpoint

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use registry_auth_gateway::api::{create_router, AppState};
use registry_auth_gateway::domain::{
    ApiKeyId, ApiKeyRecord, Credential, CredentialDigest, Publisher, PublisherId,
};
use registry_auth_gateway::infrastructure::api_key::{hash_credential, InMemoryAdminKeyStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const AUTH_CHECK: &str = "/api/registry/auth/check";
const SECRET: &str = "sk_live_abc123";
const SECRET_DIGEST: &str = "e9982364fd73c3ea5cfbc3c032589e2b8d332cd405e37d6ed3277972c1743f11";

async fn seeded_store() -> Arc<InMemoryAdminKeyStore> {
    let store = Arc::new(InMemoryAdminKeyStore::new());
    store
        .insert_publisher(Publisher::new(PublisherId::new("pub_1"), "Acme"))
        .await;
    store
        .insert_key(ApiKeyRecord::new(
            ApiKeyId::new("key_1"),
            PublisherId::new("pub_1"),
            CredentialDigest::from_hex(SECRET_DIGEST).unwrap(),
        ))
        .await;
    store
}

fn router(store: Arc<InMemoryAdminKeyStore>) -> Router {
    create_router(AppState::new(store))
}

fn auth_check_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(AUTH_CHECK);

    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    builder.body(Body::empty()).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, challenge, json)
}

async fn wait_for_touches(store: &InMemoryAdminKeyStore, expected: usize) {
    for _ in 0..200 {
        if store.touch_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

async fn settle() {
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[test]
fn test_reference_digest() {
    assert_eq!(
        hash_credential(&Credential::new(SECRET)).as_str(),
        SECRET_DIGEST
    );
}

#[tokio::test]
async fn test_valid_key_authenticates() {
    let store = seeded_store().await;

    let (status, _, body) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "authenticated": true,
            "publisher": {"id": "pub_1", "display_name": "Acme"}
        })
    );
}

#[tokio::test]
async fn test_valid_key_records_usage_once() {
    let store = seeded_store().await;

    let (status, _, _) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    wait_for_touches(&store, 1).await;
    settle().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.touch_count(), 1);

    let record = store.get_key(&ApiKeyId::new("key_1")).await.unwrap();
    assert!(record.last_used_at().is_some());
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let store = seeded_store().await;

    let (status, challenge, body) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer wrong_secret")),
    )
    .await;
    settle().await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(body, json!({"error": "Invalid token"}));
    assert_eq!(store.lookup_count(), 1);
    assert_eq!(store.touch_count(), 0);
}

#[tokio::test]
async fn test_empty_bearer_credential_is_looked_up() {
    let store = seeded_store().await;

    let (status, challenge, body) =
        send(router(store.clone()), auth_check_request(Some("Bearer "))).await;
    settle().await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(body, json!({"error": "Invalid token"}));
    assert_eq!(store.lookup_count(), 1);
    assert_eq!(store.touch_count(), 0);
}

#[tokio::test]
async fn test_usage_recorded_before_shutdown_completes() {
    let store = seeded_store().await;
    let state = AppState::new(store.clone());
    let verifier = state.credential_verifier.clone();

    let (status, _, _) = send(
        create_router(state),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    verifier.drain_usage_updates().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.touch_count(), 1);
}

#[tokio::test]
async fn test_missing_header_rejected_without_lookup() {
    let store = seeded_store().await;

    let (status, challenge, body) = send(router(store.clone()), auth_check_request(None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(
        body,
        json!({"error": "Missing or invalid Authorization header"})
    );
    assert_eq!(store.lookup_count(), 0);
    assert_eq!(store.touch_count(), 0);
}

#[tokio::test]
async fn test_non_bearer_header_rejected_without_lookup() {
    let store = seeded_store().await;

    for header_value in ["Basic dXNlcjpwYXNz", "bearer sk_live_abc123", "sk_live_abc123"] {
        let (status, _, body) = send(
            router(store.clone()),
            auth_check_request(Some(header_value)),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header_value);
        assert_eq!(
            body,
            json!({"error": "Missing or invalid Authorization header"})
        );
    }

    assert_eq!(store.lookup_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_not_a_credential_rejection() {
    let store = seeded_store().await;
    store.set_fail_lookups(true);

    let (status, challenge, body) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    settle().await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(challenge.is_none());
    assert_eq!(body, json!({"error": "Service unavailable"}));
    assert_eq!(store.touch_count(), 0);
}

#[tokio::test]
async fn test_usage_write_failure_does_not_fail_request() {
    let store = seeded_store().await;
    store.set_fail_touches(true);

    let (status, _, body) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    wait_for_touches(&store, 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], json!(true));
    assert_eq!(store.touch_count(), 1);
}

#[tokio::test]
async fn test_duplicate_digest_rejected() {
    let store = seeded_store().await;
    store
        .insert_key(ApiKeyRecord::new(
            ApiKeyId::new("key_dup"),
            PublisherId::new("pub_1"),
            CredentialDigest::from_hex(SECRET_DIGEST).unwrap(),
        ))
        .await;

    let (status, _, body) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    settle().await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid token"}));
    assert_eq!(store.touch_count(), 0);
}

#[tokio::test]
async fn test_each_key_resolves_its_own_publisher() {
    let store = seeded_store().await;
    store
        .insert_publisher(Publisher::new(PublisherId::new("pub_2"), "Globex"))
        .await;
    store
        .insert_key(ApiKeyRecord::new(
            ApiKeyId::new("key_2"),
            PublisherId::new("pub_2"),
            hash_credential(&Credential::new("sk_live_globex")),
        ))
        .await;

    let (_, _, acme) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_abc123")),
    )
    .await;
    let (_, _, globex) = send(
        router(store.clone()),
        auth_check_request(Some("Bearer sk_live_globex")),
    )
    .await;

    assert_eq!(acme["publisher"]["id"], json!("pub_1"));
    assert_eq!(globex["publisher"]["id"], json!("pub_2"));
    assert_eq!(globex["publisher"]["display_name"], json!("Globex"));
}

#[tokio::test]
async fn test_concurrent_verifications() {
    let store = seeded_store().await;
    let app = router(store.clone());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(app, auth_check_request(Some("Bearer sk_live_abc123")))
                    .await
                    .0
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    wait_for_touches(&store, 16).await;
    assert_eq!(store.touch_count(), 16);
    assert_eq!(store.lookup_count(), 16);
}

#[tokio::test]
async fn test_health_endpoints() {
    let store = seeded_store().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(router(store.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));

    let request = Request::builder().uri("/live").body(Body::empty()).unwrap();
    let (status, _, _) = send(router(store.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reflects_store() {
    let store = seeded_store().await;

    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, _, body) = send(router(store.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][0]["name"], json!("key_store"));

    store.set_fail_lookups(true);

    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, _, body) = send(router(store.clone()), request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], json!("unhealthy"));
}
