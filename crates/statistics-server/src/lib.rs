//! Sensor Statistics Service
//!
//! Fetches the report listing from the storage service and presents it as
//! time-aligned chart series.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod config;
pub mod error;
mod page;
mod routes;
pub mod source;

pub use config::{LoggingConfig, StatisticsConfig};
pub use error::{ApiError, FetchError};
pub use source::{HttpReportSource, ReportSource};

/// Application state shared across handlers
pub struct AppState {
    /// Where report listings come from
    pub source: Arc<dyn ReportSource>,
    pub version: String,
    pub start_time: Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self {
            source,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::get_index))
        .route("/graph", get(routes::get_graph))
        .route("/graph/data", get(routes::get_graph_data))
        .route("/health", get(routes::get_health))
        .route("/metrics", get(routes::get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

/// Run the server
pub async fn run_server(config: StatisticsConfig) -> anyhow::Result<()> {
    let source = HttpReportSource::new(&config.storage_base_url, config.fetch_timeout())?;
    info!(url = %source.list_url(), timeout_ms = config.fetch_timeout_ms, "Using storage service");

    let mut state = AppState::new(Arc::new(source));
    if config.metrics_enabled {
        state = state.with_metrics(PrometheusBuilder::new().install_recorder()?);
    }
    let app = create_router(Arc::new(state));

    info!("Starting statistics server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
