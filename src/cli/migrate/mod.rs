//! Migrate command - applies the registry schema

use tracing::info;

use crate::infrastructure::storage::{connect_admin_pool, run_migrations};

/// Apply pending migrations and exit
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pool = connect_admin_pool(&config.database.to_postgres_config()).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    info!("Migrations complete");

    Ok(())
}
