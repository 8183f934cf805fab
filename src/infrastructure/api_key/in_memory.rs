//! In-memory administrative key store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::api_key::{
    AdminKeyStore, ApiKeyId, ApiKeyRecord, CredentialDigest, ResolvedApiKey,
};
use crate::domain::publisher::{Publisher, PublisherId};
use crate::domain::DomainError;

/// In-memory implementation of AdminKeyStore
///
/// Counts lookups and last-used writes, and can be told to fail either
/// operation, so callers can assert exactly which store calls happened.
#[derive(Debug, Default)]
pub struct InMemoryAdminKeyStore {
    keys: Arc<RwLock<HashMap<ApiKeyId, ApiKeyRecord>>>,
    publishers: Arc<RwLock<HashMap<PublisherId, Publisher>>>,
    lookups: AtomicUsize,
    touches: AtomicUsize,
    fail_lookups: AtomicBool,
    fail_touches: AtomicBool,
}

impl InMemoryAdminKeyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_publisher(&self, publisher: Publisher) {
        self.publishers
            .write()
            .await
            .insert(publisher.id().clone(), publisher);
    }

    /// Insert a key record. Records are keyed by ID, so two records may share a digest.
    pub async fn insert_key(&self, record: ApiKeyRecord) {
        self.keys.write().await.insert(record.id().clone(), record);
    }

    pub async fn get_key(&self, id: &ApiKeyId) -> Option<ApiKeyRecord> {
        self.keys.read().await.get(id).cloned()
    }

    /// Number of `find_by_digest` calls so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of `touch_last_used` attempts so far, including failed ones
    pub fn touch_count(&self) -> usize {
        self.touches.load(Ordering::SeqCst)
    }

    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_touches(&self, fail: bool) {
        self.fail_touches.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdminKeyStore for InMemoryAdminKeyStore {
    async fn find_by_digest(
        &self,
        digest: &CredentialDigest,
    ) -> Result<Vec<ResolvedApiKey>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory store configured to fail"));
        }

        let keys = self.keys.read().await;
        let publishers = self.publishers.read().await;

        // Inner-join semantics: a key whose publisher is missing does not resolve.
        let matches = keys
            .values()
            .filter(|record| record.key_hash() == digest)
            .filter_map(|record| {
                publishers
                    .get(record.publisher_id())
                    .map(|publisher| ResolvedApiKey {
                        record: record.clone(),
                        publisher: publisher.clone(),
                    })
            })
            .collect();

        Ok(matches)
    }

    async fn touch_last_used(
        &self,
        digest: &CredentialDigest,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.touches.fetch_add(1, Ordering::SeqCst);

        if self.fail_touches.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory store configured to fail"));
        }

        let mut keys = self.keys.write().await;

        for record in keys.values_mut().filter(|r| r.key_hash() == digest) {
            record.record_usage(at);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory store configured to fail"));
        }

        Ok(())
    }
}
