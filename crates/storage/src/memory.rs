//! In-memory Repository

use crate::repository::ReportRepository;
use crate::StorageError;
use async_trait::async_trait;
use sensor_report::{NewReport, SensorReport};
use std::sync::Mutex;
use tracing::{debug, info};

struct Inner {
    reports: Vec<SensorReport>,
    next_id: i64,
}

/// Non-persistent repository, used in tests and for local development.
///
/// Identifier assignment and the append happen under one lock.
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            inner: Mutex::new(Inner {
                reports: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Persistence(format!("Lock error: {}", e)))
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for MemoryRepository {
    async fn save(&self, report: NewReport) -> Result<SensorReport, StorageError> {
        let mut inner = self.lock()?;

        let id = inner.next_id;
        inner.next_id += 1;

        let stored = report.into_persisted(id);
        inner.reports.push(stored.clone());
        debug!("Inserted report with ID {}", id);

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<SensorReport>, StorageError> {
        Ok(self.lock()?.reports.clone())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.lock()?.reports.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn sample(pressure: i32) -> NewReport {
        NewReport::new("a", 21.5, pressure, 40, None)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = MemoryRepository::new();

        let stored = repo.save(sample(101300)).await.unwrap();
        assert_eq!(stored.id, 1);

        let reports = repo.list_all().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].pressure, 101300);
    }

    #[tokio::test]
    async fn test_sequential_ids_in_order() {
        let repo = MemoryRepository::new();
        for p in [101300, 101400, 101500] {
            repo.save(sample(p)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_get_unique_ids() {
        let repo = Arc::new(MemoryRepository::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.save(sample(100000 + i)).await.unwrap().id })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 50);

        let listed: Vec<i64> = repo.list_all().await.unwrap().iter().map(|r| r.id).collect();
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }
}
