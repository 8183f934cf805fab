//! Storage infrastructure - privileged connection pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{registry_migrations, run_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_admin_pool, PostgresConfig};
