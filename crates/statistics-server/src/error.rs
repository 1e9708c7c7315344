//! Fetch and HTTP error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures fetching the report listing from the storage service
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// No response within the configured bound
    #[error("Storage service did not respond within {0}ms")]
    Timeout(u64),

    /// Non-success HTTP status
    #[error("Storage service returned status {0}")]
    Status(u16),

    /// Body was not JSON
    #[error("Response body is not JSON: {0}")]
    NotJson(String),

    /// Body was JSON but not an array
    #[error("Response body is not a JSON array")]
    NotAnArray,
}

/// Errors returned by the statistics handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to render series: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: bool,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Fetch(FetchError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Fetch(_) => StatusCode::BAD_GATEWAY,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Graph request failed");
        if let ApiError::Fetch(_) = self {
            metrics::counter!("graph_fetch_errors_total").increment(1);
        }

        let body = ErrorBody {
            status: false,
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
