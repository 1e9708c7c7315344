//! Report Records

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current server time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A validated report that has not been persisted yet.
///
/// The only way to build one is [`NewReport::new`], which stamps `created`
/// with the server clock. Fields are read-only so the timestamp cannot be
/// replaced after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    sensor_id: String,
    temperature: f64,
    pressure: i32,
    humidity: i32,
    particles: f64,
    created: i64,
}

impl NewReport {
    /// Create a report stamped with the current server time.
    ///
    /// An absent particle count is stored as zero.
    pub fn new(
        sensor_id: impl Into<String>,
        temperature: f64,
        pressure: i32,
        humidity: i32,
        particles: Option<f64>,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            temperature,
            pressure,
            humidity,
            particles: particles.unwrap_or(0.0),
            created: now_millis(),
        }
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    pub fn humidity(&self) -> i32 {
        self.humidity
    }

    pub fn particles(&self) -> f64 {
        self.particles
    }

    /// Server receipt time (epoch ms)
    pub fn created(&self) -> i64 {
        self.created
    }

    /// Attach the identifier assigned by the store
    pub fn into_persisted(self, id: i64) -> SensorReport {
        SensorReport {
            id,
            sensor_id: self.sensor_id,
            created: self.created,
            temperature: self.temperature,
            pressure: self.pressure,
            humidity: self.humidity,
            particles: self.particles,
        }
    }
}

/// Persisted sensor report, as stored and as listed on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReport {
    pub id: i64,
    pub sensor_id: String,
    /// Epoch milliseconds, server-assigned
    pub created: i64,
    pub temperature: f64,
    /// Raw sensor units (Pa)
    pub pressure: i32,
    pub humidity: i32,
    #[serde(default)]
    pub particles: f64,
}
