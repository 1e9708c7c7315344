//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sensor_report::ValidationError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by the storage service handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Body of every failed response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: bool,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => {
                warn!(error = %e, "Rejected report");
                metrics::counter!("reports_rejected_total", "field" => e.field().unwrap_or("payload"))
                    .increment(1);
            }
            ApiError::Storage(e) => {
                error!(error = %e, "Storage failure");
                metrics::counter!("storage_errors_total").increment(1);
            }
        }

        let body = ErrorBody {
            status: false,
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
