use serde::Deserialize;

use crate::infrastructure::storage::PostgresConfig;

/// Application configuration
///
/// Layered from `config/default.*`, `config/local.*`, then `APP__`-prefixed
/// environment variables (e.g. `APP__DATABASE__URL`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Privileged database connection settings.
///
/// `url` must name a role that bypasses row-level security (a service role);
/// key lookups happen before the caller's tenant is known.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let defaults = PostgresConfig::default();

        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
            connect_timeout_secs: defaults.connect_timeout_secs,
            idle_timeout_secs: defaults.idle_timeout_secs,
        }
    }
}

impl DatabaseConfig {
    pub fn to_postgres_config(&self) -> PostgresConfig {
        PostgresConfig::new(&self.url)
            .with_max_connections(self.max_connections)
            .with_min_connections(self.min_connections)
            .with_connect_timeout(self.connect_timeout_secs)
            .with_idle_timeout(self.idle_timeout_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
