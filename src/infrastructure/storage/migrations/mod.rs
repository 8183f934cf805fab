//! Database migrations for the registry key tables

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration, returning false if it was already applied
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)",
        )
        .bind(migration.version)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))?;

        if applied {
            return Ok(false);
        }

        // Migrations contain several statements, which prepared queries reject.
        sqlx::raw_sql(&migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let version: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(version) FROM _migrations WHERE success = TRUE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))?;

        Ok(version)
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// Schema for publishers and their API keys
pub fn registry_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create publishers table",
            r#"
            CREATE TABLE IF NOT EXISTS publishers (
                id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        ),
        Migration::new(
            2,
            "Create api_keys table",
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id TEXT PRIMARY KEY,
                publisher_id TEXT NOT NULL REFERENCES publishers(id) ON DELETE CASCADE,
                key_hash TEXT NOT NULL,
                last_used_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_api_keys_key_hash ON api_keys(key_hash);
            CREATE INDEX IF NOT EXISTS idx_api_keys_publisher_id ON api_keys(publisher_id);
            "#,
        ),
        Migration::new(
            3,
            "Enable row-level security on registry tables",
            r#"
            ALTER TABLE publishers ENABLE ROW LEVEL SECURITY;
            ALTER TABLE api_keys ENABLE ROW LEVEL SECURITY;
            "#,
        ),
    ]
}

/// Runs all pending registry migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    for migration in registry_migrations() {
        if migrator.run_migration(&migration).await? {
            info!(
                version = migration.version,
                description = %migration.description,
                "Applied migration"
            );
        }
    }

    if let Some(version) = migrator.current_version().await? {
        info!(version, "Schema is up to date");
    }

    Ok(())
}
