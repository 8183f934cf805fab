//! Credential verification service
//!
//! Resolves a bearer credential to its publisher through the administrative
//! key store and records key usage without holding up the response.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::domain::api_key::{
    AdminKeyStore, ApiKeyId, AuthError, Credential, CredentialDigest,
};
use crate::domain::publisher::Publisher;
use crate::domain::DomainError;

use super::hasher::hash_credential;

/// Authorization scheme prefix, matched case-sensitively
pub const BEARER_PREFIX: &str = "Bearer ";

/// A successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub api_key_id: ApiKeyId,
    pub publisher: Publisher,
}

/// Extract the credential from a raw `Authorization` header value.
///
/// Everything after `Bearer ` is the credential, untrimmed.
pub fn parse_bearer(authorization: Option<&str>) -> Result<Credential, AuthError> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(Credential::new)
        .ok_or(AuthError::MissingOrMalformedCredential)
}

/// Verifies registry API keys against the administrative store
pub struct CredentialVerifier {
    store: Arc<dyn AdminKeyStore>,
    usage_tasks: TaskTracker,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("pending_usage_updates", &self.usage_tasks.len())
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Create a verifier backed by the given administrative store
    pub fn new(store: Arc<dyn AdminKeyStore>) -> Self {
        Self {
            store,
            usage_tasks: TaskTracker::new(),
        }
    }

    /// Verify the raw value of an `Authorization` header.
    ///
    /// Malformed headers are rejected before the store is queried. On success a
    /// last-used update is spawned for the matched key; its outcome never
    /// affects the result.
    pub async fn verify(&self, authorization: Option<&str>) -> Result<Verification, AuthError> {
        let credential = parse_bearer(authorization)?;
        let digest = hash_credential(&credential);

        debug!(digest_prefix = %digest.short(), "Verifying registry API key");

        let mut matches = self.store.find_by_digest(&digest).await.map_err(|e| {
            error!(error = %e, "API key lookup failed");
            AuthError::StoreUnavailable(e.to_string())
        })?;

        if matches.len() > 1 {
            // Duplicate digests mean the uniqueness constraint is missing or was bypassed.
            error!(
                digest_prefix = %digest.short(),
                count = matches.len(),
                "Multiple API keys share one digest; rejecting"
            );
            return Err(AuthError::InvalidCredential);
        }

        let Some(resolved) = matches.pop() else {
            debug!(digest_prefix = %digest.short(), "No API key matches digest");
            return Err(AuthError::InvalidCredential);
        };

        let api_key_id = resolved.record.id().clone();
        self.spawn_usage_update(digest, api_key_id.clone());

        info!(
            api_key_id = %api_key_id,
            publisher_id = %resolved.publisher.id(),
            "Registry API key verified"
        );

        Ok(Verification {
            api_key_id,
            publisher: resolved.publisher,
        })
    }

    /// Check that the administrative store is reachable
    pub async fn check_store(&self) -> Result<(), DomainError> {
        self.store.ping().await
    }

    /// Stop accepting usage updates and wait for the pending ones to finish.
    ///
    /// Call once the server has stopped taking requests; verifications made
    /// afterwards still succeed but their usage is not recorded.
    pub async fn drain_usage_updates(&self) {
        self.usage_tasks.close();
        let pending = self.usage_tasks.len();
        if pending > 0 {
            info!(pending, "Waiting for pending usage updates");
        }
        self.usage_tasks.wait().await;
    }

    fn spawn_usage_update(&self, digest: CredentialDigest, api_key_id: ApiKeyId) {
        let store = Arc::clone(&self.store);
        let at = Utc::now();

        // Not awaited by the request; concurrent updates for one key are last-writer-wins.
        self.usage_tasks.spawn(async move {
            if let Err(e) = store.touch_last_used(&digest, at).await {
                let err = AuthError::AuditWriteFailed(e.to_string());
                warn!(api_key_id = %api_key_id, error = %err, "Usage not recorded");
            }
        });
    }
}
