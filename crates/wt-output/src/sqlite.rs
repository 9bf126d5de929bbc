//! SQLite reading store (feature `sqlite`).
//!
//! One table, `iot_readings`, with an autoincrement id.  Timestamps are
//! stored as fixed-width millisecond RFC 3339 text so that `ORDER BY
//! timestamp` is chronological.  All database work runs on Tokio's blocking
//! pool; an insert whose caller timed out before it reached the connection
//! is skipped.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use tracing::debug;
use wt_aggregate::{ReadingSource, SourceError};
use wt_core::{Reading, SensorId};
use wt_sim::{ReadingSink, SinkError};

use crate::OutputResult;
use crate::blocking::with_locked;
use crate::row::timestamp_text;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS iot_readings (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        sensor_id     TEXT    NOT NULL,
        latitude      REAL    NOT NULL,
        longitude     REAL    NOT NULL,
        temperature   REAL    NOT NULL,
        motion        INTEGER NOT NULL DEFAULT 0,
        battery_level INTEGER NOT NULL DEFAULT 100,
        timestamp     TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS iot_readings_timestamp
        ON iot_readings (timestamp);
    CREATE INDEX IF NOT EXISTS iot_readings_sensor_timestamp
        ON iot_readings (sensor_id, timestamp);";

const SELECT_COLUMNS: &str =
    "SELECT sensor_id, latitude, longitude, temperature, motion, battery_level, timestamp \
     FROM iot_readings";

/// Row as it comes out of SQLite, before the timestamp is parsed.
type RawRow = (String, f64, f64, f64, bool, u8, String);

/// Reading store backed by an SQLite database.
///
/// Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::init(conn)
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> OutputResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Insert one reading.
    pub async fn insert(&self, reading: Reading) -> OutputResult<()> {
        with_locked(&self.conn, move |conn| {
            conn.prepare_cached(
                "INSERT INTO iot_readings \
                 (sensor_id, latitude, longitude, temperature, motion, battery_level, timestamp) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?
            .execute(params![
                reading.sensor_id.as_str(),
                reading.latitude,
                reading.longitude,
                reading.temperature,
                reading.motion_detected,
                reading.battery_level,
                timestamp_text(&reading.timestamp),
            ])?;
            Ok(())
        })
        .await
    }

    /// Newest `limit` readings across all sensors; ties by insertion order,
    /// latest first.
    pub async fn recent(&self, limit: usize) -> OutputResult<Vec<Reading>> {
        with_locked(&self.conn, move |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC LIMIT ?1"
            ))?;
            let rows = stmt
                .query_map(params![limit as i64], raw_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(into_reading).collect()
        })
        .await
    }

    /// Newest `limit` readings of one sensor.
    pub async fn recent_for(&self, sensor: &SensorId, limit: usize) -> OutputResult<Vec<Reading>> {
        let sensor = sensor.clone();
        with_locked(&self.conn, move |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "{SELECT_COLUMNS} WHERE sensor_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt
                .query_map(params![sensor.as_str(), limit as i64], raw_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(into_reading).collect()
        })
        .await
    }

    /// Total rows stored.
    pub async fn count(&self) -> OutputResult<u64> {
        with_locked(&self.conn, |conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM iot_readings", [], |row| row.get(0))?;
            Ok(n as u64)
        })
        .await
    }

    /// Fold the write-ahead log back into the main database file.
    ///
    /// Calling it again is a no-op.
    pub async fn checkpoint(&self) -> OutputResult<()> {
        with_locked(&self.conn, |conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
            debug!("sqlite checkpoint complete");
            Ok(())
        })
        .await
    }
}

fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn into_reading(
    (sensor_id, latitude, longitude, temperature, motion_detected, battery_level, timestamp): RawRow,
) -> OutputResult<Reading> {
    Ok(Reading {
        sensor_id: SensorId(sensor_id),
        latitude,
        longitude,
        temperature,
        motion_detected,
        battery_level,
        timestamp: DateTime::parse_from_rfc3339(&timestamp)?.with_timezone(&Utc),
    })
}

#[async_trait]
impl ReadingSink for SqliteStore {
    async fn append(&self, reading: Reading) -> Result<(), SinkError> {
        self.insert(reading).await?;
        Ok(())
    }
}

#[async_trait]
impl ReadingSource for SqliteStore {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Reading>, SourceError> {
        Ok(self.recent(limit).await?)
    }

    async fn fetch_sensor(&self, sensor: &SensorId, limit: usize) -> Result<Vec<Reading>, SourceError> {
        Ok(self.recent_for(sensor, limit).await?)
    }
}
