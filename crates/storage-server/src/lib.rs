//! Sensor Report Storage Service
//!
//! Accepts sensor reports over HTTP, persists them and lists them back.

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Instant;
use storage::ReportRepository;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod config;
pub mod error;
mod routes;

pub use config::{LoggingConfig, StorageConfig};
pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    /// Report repository
    pub repository: Arc<dyn ReportRepository>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            repository,
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
        .route("/report", post(routes::reports::post_report))
        .route("/list", get(routes::reports::get_list))
        .route("/health", get(routes::health::get_health))
        .route("/metrics", get(routes::health::get_metrics))
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
pub async fn run_server(config: StorageConfig) -> anyhow::Result<()> {
    let repository = storage::open(&config.database_url, config.max_connections).await?;

    let mut state = AppState::new(repository);
    if config.metrics_enabled {
        state = state.with_metrics(PrometheusBuilder::new().install_recorder()?);
    }
    let app = create_router(Arc::new(state));

    info!("Starting storage server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
