//! Sensor Report Model
//!
//! Record schema, ingest payload and field-presence validation for
//! environmental sensor readings.

mod error;
mod report;
mod validator;

pub use error::ValidationError;
pub use report::{now_millis, NewReport, SensorReport};
pub use validator::ReportPayload;
