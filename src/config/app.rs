//! Application configuration loaded from `config.toml` and the environment.
//!
//! Every section has defaults, so a missing file is not an error. Values from the
//! environment (usually via `.env`) override the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Connection pool and query settings
    pub database: DatabaseConfig,
    /// Log filter settings
    pub logging: LoggingConfig,
    /// Demonstration data settings
    pub seed: SeedConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config {
                message: format!("Invalid server address {}:{}: {e}", self.host, self.port),
            })
    }
}

/// Connection pool and query settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL (`sqlite://...` or `postgres://...`)
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open when idle
    pub min_connections: u32,
    /// Time allowed to open a connection
    pub connect_timeout_secs: u64,
    /// Time allowed to take a connection from the pool
    pub acquire_timeout_secs: u64,
    /// Time allowed for a single store call
    pub query_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://system_registry.sqlite?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            query_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// Bound on a single store call.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Demonstration data settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the demonstration systems into an empty table on start-up
    pub enabled: bool,
}

/// Parses configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is invalid.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse configuration: {e}"),
    })
}

/// Loads configuration from a TOML file that must exist.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads the application configuration.
///
/// Reads `CONFIG_PATH` (default `config.toml`) if it exists, then applies
/// environment overrides.
///
/// # Errors
/// Returns [`Error::Config`] if the file is invalid or an override cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&path).exists() {
        tracing::debug!("Loading configuration from {path}");
        load_config(&path)?
    } else {
        AppConfig::default()
    };
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Applies overrides looked up by environment variable name.
///
/// # Errors
/// Returns [`Error::Config`] if a numeric or boolean override does not parse.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").or_else(|| lookup("POSTGRES_URL")) {
        config.database.url = url;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = parse_override("PORT", &port)?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(enabled) = lookup("SEED_ON_STARTUP") {
        config.seed.enabled = parse_override("SEED_ON_STARTUP", &enabled)?;
    }
    Ok(config)
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid value {value:?} for {key}: {e}"),
    })
}
