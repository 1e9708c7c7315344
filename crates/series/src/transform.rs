//! Report listing to chart series

use sensor_report::SensorReport;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw pressure units per charted unit (Pa -> bar)
pub const PRESSURE_SCALE: f64 = 100_000.0;

/// Index-aligned chart series.
///
/// Index `i` of every sequence describes the same source report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Milliseconds since the first report in the listing
    pub labels: Vec<i64>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<i32>,
    /// Pressure divided by [`PRESSURE_SCALE`]
    pub pressure: Vec<f64>,
}

/// The four series, each rendered as a JSON array literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesJson {
    pub labels: String,
    pub temperature: String,
    pub humidity: String,
    pub pressure: String,
}

impl ChartSeries {
    /// Build series from reports in listing order.
    ///
    /// The baseline is the `created` value of the first element, not the
    /// minimum. Labels saturate at the `i64` bounds. An empty listing yields
    /// four empty series.
    pub fn from_reports(reports: &[SensorReport]) -> Self {
        let Some(first) = reports.first() else {
            return Self::default();
        };
        let baseline = first.created;

        let mut series = Self {
            labels: Vec::with_capacity(reports.len()),
            temperature: Vec::with_capacity(reports.len()),
            humidity: Vec::with_capacity(reports.len()),
            pressure: Vec::with_capacity(reports.len()),
        };

        for report in reports {
            series.labels.push(report.created.saturating_sub(baseline));
            series.temperature.push(report.temperature);
            series.humidity.push(report.humidity);
            series.pressure.push(f64::from(report.pressure) / PRESSURE_SCALE);
        }

        debug!(points = series.len(), baseline, "Built chart series");
        series
    }

    /// Number of points in each series
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render every series as a JSON array for embedding in a page
    pub fn to_json(&self) -> Result<SeriesJson, serde_json::Error> {
        Ok(SeriesJson {
            labels: serde_json::to_string(&self.labels)?,
            temperature: serde_json::to_string(&self.temperature)?,
            humidity: serde_json::to_string(&self.humidity)?,
            pressure: serde_json::to_string(&self.pressure)?,
        })
    }
}
