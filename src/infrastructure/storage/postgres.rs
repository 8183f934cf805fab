//! PostgreSQL connection pooling for the administrative store

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Connection URL for a role that bypasses row-level security
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/registry".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    fn connect_options(&self) -> Result<PgConnectOptions, DomainError> {
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| DomainError::configuration(format!("Invalid database URL: {}", e)))?;

        // With row_security off, a query that row-level security would filter
        // errors out instead of silently returning fewer rows. A misconfigured
        // role then shows up as a store fault rather than as rejected keys.
        Ok(options.options([("row_security", "off")]))
    }
}

/// Open the privileged connection pool used for cross-tenant key lookups
pub async fn connect_admin_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    info!(
        max_connections = config.max_connections,
        "Administrative database pool ready"
    );

    Ok(pool)
}
