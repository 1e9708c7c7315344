//! Storage service configuration
//!
//! Defaults, then an optional TOML file, then `SENSORLOG_STORAGE__*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Default config file stem, resolved as `storage-server.toml`
pub const DEFAULT_CONFIG_FILE: &str = "storage-server";

/// Environment prefix, e.g. `SENSORLOG_STORAGE__BIND_ADDR`
pub const ENV_PREFIX: &str = "SENSORLOG_STORAGE";

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Listen address
    pub bind_addr: String,
    /// SQLite URL, or `memory` for the in-process store
    pub database_url: String,
    pub max_connections: u32,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `storage=debug,info`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl StorageConfig {
    /// Load configuration from `path` (or the default file) and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:9000")?
            .set_default("database_url", "sqlite://sensor_reports.db")?
            .set_default("max_connections", 5_i64)?
            .set_default("metrics_enabled", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::load(Some("does-not-exist")).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }
}
