//! Health and metrics routes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: String,
    pub report_count: Option<u64>,
}

/// Health check handler
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (database, report_count) = match state.repository.count().await {
        Ok(count) => ("ok", Some(count)),
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            ("degraded", None)
        }
    };

    Json(HealthResponse {
        status: if report_count.is_some() { "healthy" } else { "degraded" }.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: database.to_string(),
        report_count,
    })
}

/// Prometheus scrape endpoint
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
