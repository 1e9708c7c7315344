//! Report Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use sensor_report::{ReportPayload, SensorReport, ValidationError};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Response for a stored report
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: bool,
}

/// Ingest one report
pub async fn post_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ValidationError::InvalidPayload(rejection.body_text()))?;

    let report = payload.validate()?;
    let stored = state.repository.save(report).await?;

    metrics::counter!("reports_ingested_total").increment(1);
    info!(id = stored.id, sensor_id = %stored.sensor_id, "Stored report");

    Ok(Json(ReportResponse { status: true }))
}

/// List every stored report in insertion order
pub async fn get_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SensorReport>>, ApiError> {
    let reports = state.repository.list_all().await?;
    metrics::histogram!("report_list_size").record(reports.len() as f64);
    Ok(Json(reports))
}
