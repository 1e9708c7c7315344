//! Repository Interface

use crate::StorageError;
use async_trait::async_trait;
use sensor_report::{NewReport, SensorReport};

/// Store of sensor reports.
///
/// Reports are append-only: there is no update or delete. Implementations
/// must assign identifiers atomically so that concurrent saves never share
/// one, and must surface backend failures as errors rather than empty
/// results.
#[async_trait]
pub trait ReportRepository: Send + Sync + 'static {
    /// Persist a report and return it with its assigned identifier
    async fn save(&self, report: NewReport) -> Result<SensorReport, StorageError>;

    /// Every stored report in identifier order
    async fn list_all(&self) -> Result<Vec<SensorReport>, StorageError>;

    /// Number of stored reports
    async fn count(&self) -> Result<u64, StorageError>;
}
