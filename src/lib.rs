//! Registry Auth Gateway
//!
//! Verifies registry API keys presented as bearer tokens:
//! - SHA-256 digest lookup through a privileged, cross-tenant key store
//! - Resolution of the key to its owning publisher
//! - Best-effort recording of when each key was last used

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::api_key::PostgresAdminKeyStore;
use infrastructure::storage::connect_admin_pool;

/// Build application state backed by the configured PostgreSQL database
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = connect_admin_pool(&config.database.to_postgres_config()).await?;
    let store = Arc::new(PostgresAdminKeyStore::new(pool));

    Ok(AppState::new(store))
}
