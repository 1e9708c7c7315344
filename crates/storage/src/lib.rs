//! Storage Layer
//!
//! Persistence of sensor reports behind the [`ReportRepository`] trait,
//! with a SQLite implementation and an in-memory one.

mod memory;
mod repository;
mod sqlite;

pub use memory::MemoryRepository;
pub use repository::ReportRepository;
pub use sqlite::SqliteRepository;

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// `database_url` value selecting the in-memory repository
pub const MEMORY_URL: &str = "memory";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing store failed or is unavailable
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// A stored row could not be decoded into a report
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Persistence(err.to_string())
    }
}

/// Open the repository named by `database_url`.
///
/// [`MEMORY_URL`] selects [`MemoryRepository`]; anything else is handed to
/// SQLite and the schema is created if missing.
pub async fn open(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn ReportRepository>, StorageError> {
    if database_url == MEMORY_URL {
        info!("Using in-memory report repository");
        return Ok(Arc::new(MemoryRepository::new()));
    }

    let repo = SqliteRepository::connect(database_url, max_connections).await?;
    Ok(Arc::new(repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_report::NewReport;

    #[tokio::test]
    async fn test_open_memory() {
        let repo = open(MEMORY_URL, 1).await.unwrap();
        repo.save(NewReport::new("a", 1.0, 2, 3, None)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_open_sqlite_memory() {
        let repo = open("sqlite::memory:", 4).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
