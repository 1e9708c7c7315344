//! Statistics routes

use axum::{extract::State, http::StatusCode, response::Html, response::IntoResponse, Json};
use serde::Serialize;
use series::ChartSeries;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::page;
use crate::AppState;

/// Landing page
pub async fn get_index() -> Html<String> {
    Html(page::render_index())
}

async fn load_series(state: &AppState) -> Result<ChartSeries, ApiError> {
    metrics::counter!("graph_requests_total").increment(1);

    let reports = state.source.fetch_reports().await?;
    let series = ChartSeries::from_reports(&reports);
    info!(points = series.len(), "Built graph series");

    Ok(series)
}

/// Chart page
pub async fn get_graph(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let series = load_series(&state).await?;
    Ok(Html(page::render_graph(&series.to_json()?)))
}

/// The four series as a JSON object
pub async fn get_graph_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSeries>, ApiError> {
    Ok(Json(load_series(&state).await?))
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Prometheus scrape endpoint
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
