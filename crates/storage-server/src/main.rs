//! Sensor Report Storage Service - Main Entry Point

use storage_server::{init_logging, run_server, StorageConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("SENSORLOG_CONFIG").ok();
    let config = StorageConfig::load(config_path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== Sensor Report Storage v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
