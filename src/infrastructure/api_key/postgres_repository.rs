//! PostgreSQL administrative key store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{
    AdminKeyStore, ApiKeyId, ApiKeyRecord, CredentialDigest, ResolvedApiKey,
};
use crate::domain::publisher::{Publisher, PublisherId};
use crate::domain::DomainError;

/// PostgreSQL implementation of AdminKeyStore
///
/// The pool must be opened with a role that bypasses row-level security; see
/// [`crate::infrastructure::storage::connect_admin_pool`].
#[derive(Debug, Clone)]
pub struct PostgresAdminKeyStore {
    pool: PgPool,
}

impl PostgresAdminKeyStore {
    /// Create a new store with the given privileged connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminKeyStore for PostgresAdminKeyStore {
    async fn find_by_digest(
        &self,
        digest: &CredentialDigest,
    ) -> Result<Vec<ResolvedApiKey>, DomainError> {
        // LIMIT 2 is enough to tell "exactly one" from "more than one".
        let rows = sqlx::query(
            r#"
            SELECT k.id, k.publisher_id, k.key_hash, k.last_used_at, p.display_name
            FROM api_keys k
            INNER JOIN publishers p ON p.id = k.publisher_id
            WHERE k.key_hash = $1
            LIMIT 2
            "#,
        )
        .bind(digest.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up API key: {}", e)))?;

        rows.iter().map(row_to_resolved).collect()
    }

    async fn touch_last_used(
        &self,
        digest: &CredentialDigest,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE api_keys SET last_used_at = $2 WHERE key_hash = $1")
            .bind(digest.as_str())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to update API key last_used_at: {}", e))
            })?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))?;

        Ok(())
    }
}

fn row_to_resolved(row: &PgRow) -> Result<ResolvedApiKey, DomainError> {
    let id: String = row.try_get("id").map_err(column_error)?;
    let publisher_id: String = row.try_get("publisher_id").map_err(column_error)?;
    let key_hash: String = row.try_get("key_hash").map_err(column_error)?;
    let last_used_at: Option<DateTime<Utc>> = row.try_get("last_used_at").map_err(column_error)?;
    let display_name: String = row.try_get("display_name").map_err(column_error)?;

    let publisher_id = PublisherId::new(publisher_id);
    let mut record = ApiKeyRecord::new(
        ApiKeyId::new(id),
        publisher_id.clone(),
        CredentialDigest::from_hex(key_hash)?,
    );

    if let Some(at) = last_used_at {
        record = record.with_last_used_at(at);
    }

    Ok(ResolvedApiKey {
        record,
        publisher: Publisher::new(publisher_id, display_name),
    })
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to read API key row: {}", e))
}
