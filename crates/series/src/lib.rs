//! Chart Series
//!
//! Converts a report listing into four index-aligned sequences: elapsed
//! time since the first report, temperature, humidity and normalized
//! pressure.

mod transform;

pub use transform::{ChartSeries, SeriesJson, PRESSURE_SCALE};
