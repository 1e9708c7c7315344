//! Statistics service configuration
//!
//! Defaults, then an optional TOML file, then `SENSORLOG_STATISTICS__*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Default config file stem, resolved as `statistics-server.toml`
pub const DEFAULT_CONFIG_FILE: &str = "statistics-server";

/// Environment prefix, e.g. `SENSORLOG_STATISTICS__STORAGE_BASE_URL`
pub const ENV_PREFIX: &str = "SENSORLOG_STATISTICS";

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsConfig {
    /// Listen address
    pub bind_addr: String,
    /// Base URL of the storage service; `/list` is appended
    pub storage_base_url: String,
    /// Upper bound on one listing fetch
    pub fetch_timeout_ms: u64,
    pub metrics_enabled: bool,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl StatisticsConfig {
    /// Load configuration from `path` (or the default file) and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:9001")?
            .set_default("storage_base_url", "http://localhost:9000")?
            .set_default("fetch_timeout_ms", 5000_i64)?
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

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StatisticsConfig::load(Some("does-not-exist")).unwrap();
        assert_eq!(config.storage_base_url, "http://localhost:9000");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert!(config.metrics_enabled);
    }
}
