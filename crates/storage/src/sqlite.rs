//! SQLite Repository

use crate::repository::ReportRepository;
use crate::StorageError;
use async_trait::async_trait;
use sensor_report::{NewReport, SensorReport};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS sensor_reports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sensor_id TEXT NOT NULL,
        temperature REAL NOT NULL,
        pressure INTEGER NOT NULL,
        humidity INTEGER NOT NULL,
        particles REAL,
        created INTEGER NOT NULL
    )
"#;

const INSERT_REPORT: &str = r#"
    INSERT INTO sensor_reports (sensor_id, temperature, pressure, humidity, particles, created)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

const SELECT_ALL: &str = r#"
    SELECT id, sensor_id, temperature, pressure, humidity, particles, created
    FROM sensor_reports
    ORDER BY id ASC
"#;

/// Repository backed by a SQLite database.
///
/// Identifiers come from the `AUTOINCREMENT` primary key.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to `database_url` and create the schema if missing.
    ///
    /// In-memory databases are pinned to a single connection so every query
    /// sees the same database.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        info!("Connected to SQLite database {}", database_url);

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if missing
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        debug!("sensor_reports schema ready");
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Decode one row; legacy rows without `particles` read back as zero
fn decode_row(row: &SqliteRow) -> Result<SensorReport, sqlx::Error> {
    Ok(SensorReport {
        id: row.try_get("id")?,
        sensor_id: row.try_get("sensor_id")?,
        created: row.try_get("created")?,
        temperature: row.try_get("temperature")?,
        pressure: row.try_get("pressure")?,
        humidity: row.try_get("humidity")?,
        particles: row.try_get::<Option<f64>, _>("particles")?.unwrap_or(0.0),
    })
}

#[async_trait]
impl ReportRepository for SqliteRepository {
    async fn save(&self, report: NewReport) -> Result<SensorReport, StorageError> {
        let result = sqlx::query(INSERT_REPORT)
            .bind(report.sensor_id())
            .bind(report.temperature())
            .bind(report.pressure())
            .bind(report.humidity())
            .bind(report.particles())
            .bind(report.created())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted report with ID {}", id);

        Ok(report.into_persisted(id))
    }

    async fn list_all(&self) -> Result<Vec<SensorReport>, StorageError> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;

        let reports = rows
            .iter()
            .filter_map(|row| match decode_row(row) {
                Ok(report) => Some(report),
                Err(e) => {
                    let err = StorageError::MalformedRecord(e.to_string());
                    warn!(error = %err, "Skipping stored report");
                    None
                }
            })
            .collect();

        Ok(reports)
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensor_reports")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
