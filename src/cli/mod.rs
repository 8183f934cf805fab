//! CLI module for the registry auth gateway
//!
//! - `serve`: run the HTTP server
//! - `migrate`: apply the registry schema and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Registry API key verification gateway
#[derive(Parser)]
#[command(name = "registry-auth-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply database migrations
    Migrate,
}

/// Load `.env`, configuration, and logging shared by every subcommand
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
