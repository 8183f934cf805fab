//! API Key record and its resolved form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::CredentialDigest;
use crate::domain::publisher::{Publisher, PublisherId};

/// API Key identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(String);

impl ApiKeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted API key row, keyed by the digest of its secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    id: ApiKeyId,
    publisher_id: PublisherId,
    key_hash: CredentialDigest,
    /// None until the key is first used successfully
    #[serde(skip_serializing_if = "Option::is_none")]
    last_used_at: Option<DateTime<Utc>>,
}

impl ApiKeyRecord {
    pub fn new(id: ApiKeyId, publisher_id: PublisherId, key_hash: CredentialDigest) -> Self {
        Self {
            id,
            publisher_id,
            key_hash,
            last_used_at: None,
        }
    }

    pub fn with_last_used_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_used_at = Some(at);
        self
    }

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn publisher_id(&self) -> &PublisherId {
        &self.publisher_id
    }

    pub fn key_hash(&self) -> &CredentialDigest {
        &self.key_hash
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    /// Record key usage
    pub fn record_usage(&mut self, at: DateTime<Utc>) {
        self.last_used_at = Some(at);
    }
}

/// An API key joined with the publisher it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApiKey {
    pub record: ApiKeyRecord,
    pub publisher: Publisher,
}
