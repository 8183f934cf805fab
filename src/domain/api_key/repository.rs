//! Privileged API key store

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::credential::CredentialDigest;
use super::entity::ResolvedApiKey;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Administrative access to API keys across every tenant.
///
/// The caller's tenant is unknown before authentication, so implementations
/// bypass row-level access control. Only the operations the verifier needs are
/// exposed; nothing else in the service gets this capability.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminKeyStore: Send + Sync {
    /// Find every key whose digest matches, joined with its publisher.
    ///
    /// Returns all matches so callers can detect duplicate digests.
    async fn find_by_digest(
        &self,
        digest: &CredentialDigest,
    ) -> Result<Vec<ResolvedApiKey>, DomainError>;

    /// Set the last-used timestamp of the key with this digest
    async fn touch_last_used(
        &self,
        digest: &CredentialDigest,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
