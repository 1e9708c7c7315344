//! Report listing client for the storage service.

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use sensor_report::SensorReport;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of the full report listing.
///
/// The listing is returned in the storage service's order.
#[async_trait]
pub trait ReportSource: Send + Sync + 'static {
    async fn fetch_reports(&self) -> Result<Vec<SensorReport>, FetchError>;
}

/// Fetches `/list` from the storage service over HTTP.
pub struct HttpReportSource {
    client: reqwest::Client,
    list_url: String,
    timeout: Duration,
}

impl HttpReportSource {
    /// Create a client for the storage service at `base_url`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            list_url: format!("{}/list", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis() as u64)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_reports(&self) -> Result<Vec<SensorReport>, FetchError> {
        let response = self
            .client
            .get(&self.list_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        let reports = decode_listing(&body)?;

        debug!(url = %self.list_url, count = reports.len(), "Fetched report listing");
        Ok(reports)
    }
}

/// Decode a listing body.
///
/// The body must be a JSON array. Elements that do not decode as a report
/// are skipped with a warning; the rest are kept in order.
pub fn decode_listing(body: &[u8]) -> Result<Vec<SensorReport>, FetchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::NotJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FetchError::NotAnArray);
    };

    let reports = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed report in listing");
                None
            }
        })
        .collect();

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_listing() {
        let body = br#"[
            {"id":1,"sensorId":"a","created":1000,"temperature":21.5,"pressure":101300,"humidity":40,"particles":0.0},
            {"id":2,"sensorId":"a","created":1500,"temperature":21.0,"pressure":101400,"humidity":41}
        ]"#;
        let reports = decode_listing(body).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].created, 1500);
        assert_eq!(reports[1].particles, 0.0);
    }

    #[test]
    fn test_malformed_element_skipped() {
        let body = br#"[
            {"id":1,"sensorId":"a","created":1000,"temperature":21.5,"pressure":101300,"humidity":40},
            {"id":2,"sensorId":"a","temperature":21.0,"pressure":101400,"humidity":41},
            {"id":3,"sensorId":"a","created":3000,"temperature":22.0,"pressure":101500,"humidity":42}
        ]"#;
        let reports = decode_listing(body).unwrap();
        assert_eq!(reports.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_empty_array() {
        assert!(decode_listing(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            decode_listing(b"<html>oops</html>"),
            Err(FetchError::NotJson(_))
        ));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            decode_listing(br#"{"status":true}"#),
            Err(FetchError::NotAnArray)
        ));
    }

    #[test]
    fn test_list_url() {
        let source = HttpReportSource::new("http://storage:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.list_url(), "http://storage:9000/list");
    }
}
