//! Sensor Statistics Service - Main Entry Point

use statistics_server::{init_logging, run_server, StatisticsConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("SENSORLOG_CONFIG").ok();
    let config = StatisticsConfig::load(config_path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== Sensor Statistics v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
