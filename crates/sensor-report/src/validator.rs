//! Ingest Payload Validation

use crate::error::ValidationError;
use crate::report::NewReport;
use serde::{Deserialize, Serialize};

/// Body of an ingest request.
///
/// Every field is optional at the decoding stage so that [`validate`]
/// decides which one is missing. Unknown keys, including a client-supplied
/// `created`, are ignored.
///
/// [`validate`]: ReportPayload::validate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub sensor_id: Option<String>,
    pub temperature: Option<f64>,
    pub pressure: Option<i32>,
    pub humidity: Option<i32>,
    pub particles: Option<f64>,
}

impl ReportPayload {
    /// Check required fields in order and build a report.
    ///
    /// The first absent field short-circuits: `sensorId`, `temperature`,
    /// `pressure`, `humidity`. A blank `sensorId` counts as absent.
    pub fn validate(self) -> Result<NewReport, ValidationError> {
        let sensor_id = self
            .sensor_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingField("sensorId"))?;
        let temperature = self
            .temperature
            .ok_or(ValidationError::MissingField("temperature"))?;
        let pressure = self
            .pressure
            .ok_or(ValidationError::MissingField("pressure"))?;
        let humidity = self
            .humidity
            .ok_or(ValidationError::MissingField("humidity"))?;

        Ok(NewReport::new(
            sensor_id,
            temperature,
            pressure,
            humidity,
            self.particles,
        ))
    }
}
