//! SQLite-backed reading store
//!
//! One `readings` table holds every sensor's measurements, keyed by a
//! `sensor` column so the set of sensor types stays open. Listings default
//! to insertion order (`ORDER BY id`), which is what the dashboard charts
//! consume; callers can opt into timestamp or value ordering.
//!
//! Thread-safe via a Tokio mutex around the connection, so the async API
//! handlers can share one store.

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::{NewReading, Reading, ReadingQuery, StoreStats};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, ToSql};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Configuration for the reading store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for all data
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("solarium_data"),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get path to the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("readings.db")
    }
}

/// SQLite-backed store for sensor readings
pub struct ReadingStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl ReadingStore {
    /// Create or open a reading store
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let path = config.db_path();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Configure for performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = 10000;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS readings (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                sensor    TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                unit      TEXT NOT NULL,
                value     REAL NOT NULL
            )",
            [],
        )?;

        // Index for per-sensor time range queries
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_readings_sensor_ts
             ON readings(sensor, timestamp)",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Insert one reading and return it with its assigned id
    pub async fn insert(&self, sensor: &str, reading: NewReading) -> StoreResult<Reading> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(
            "INSERT INTO readings (sensor, timestamp, unit, value)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        stmt.execute(params![
            sensor,
            reading.timestamp,
            reading.unit,
            reading.value
        ])?;

        Ok(Reading {
            id: conn.last_insert_rowid(),
            timestamp: reading.timestamp,
            unit: reading.unit,
            value: reading.value,
        })
    }

    /// Insert a batch of readings in one transaction
    ///
    /// Returns the number of readings inserted.
    pub async fn insert_batch(
        &self,
        sensor: &str,
        readings: Vec<NewReading>,
    ) -> StoreResult<usize> {
        if readings.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO readings (sensor, timestamp, unit, value)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            for reading in &readings {
                stmt.execute(params![
                    sensor,
                    reading.timestamp,
                    reading.unit,
                    reading.value
                ])?;
            }
        }

        tx.commit()?;
        Ok(readings.len())
    }

    /// List readings for a sensor
    ///
    /// Bounds are inclusive on both ends. Without an explicit order the
    /// rows come back in insertion order.
    pub async fn list(&self, sensor: &str, query: &ReadingQuery) -> StoreResult<Vec<Reading>> {
        let conn = self.conn.lock().await;

        let mut sql =
            String::from("SELECT id, timestamp, unit, value FROM readings WHERE sensor = ?");
        let mut bindings: Vec<&dyn ToSql> = vec![&sensor];

        if let Some(start) = &query.start {
            sql.push_str(" AND timestamp >= ?");
            bindings.push(start);
        }
        if let Some(end) = &query.end {
            sql.push_str(" AND timestamp <= ?");
            bindings.push(end);
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(query.order.map(|o| o.as_sql()).unwrap_or("id"));

        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(&bindings[..], row_to_reading)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    /// Fetch one reading by id
    pub async fn get(&self, sensor: &str, id: i64) -> StoreResult<Option<Reading>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(
            "SELECT id, timestamp, unit, value FROM readings
             WHERE sensor = ?1 AND id = ?2",
        )?;

        Ok(stmt
            .query_row(params![sensor, id], row_to_reading)
            .optional()?)
    }

    /// Replace a reading's fields, returning the updated row
    ///
    /// Returns `None` if no reading with that id exists for the sensor.
    pub async fn update(
        &self,
        sensor: &str,
        id: i64,
        reading: NewReading,
    ) -> StoreResult<Option<Reading>> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE readings SET timestamp = ?1, unit = ?2, value = ?3
             WHERE sensor = ?4 AND id = ?5",
            params![reading.timestamp, reading.unit, reading.value, sensor, id],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Reading {
            id,
            timestamp: reading.timestamp,
            unit: reading.unit,
            value: reading.value,
        }))
    }

    /// Delete a reading, returning whether a row was removed
    pub async fn delete(&self, sensor: &str, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "DELETE FROM readings WHERE sensor = ?1 AND id = ?2",
            params![sensor, id],
        )?;

        Ok(changed > 0)
    }

    /// Count readings for a sensor
    pub async fn count(&self, sensor: &str) -> StoreResult<u64> {
        let conn = self.conn.lock().await;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM readings WHERE sensor = ?1",
            params![sensor],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    /// Remove every reading for a sensor, returning how many were removed
    pub async fn clear(&self, sensor: &str) -> StoreResult<u64> {
        let conn = self.conn.lock().await;

        let removed = conn.execute("DELETE FROM readings WHERE sensor = ?1", params![sensor])?;

        Ok(removed as u64)
    }

    /// Aggregate counts for health reporting
    pub async fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.conn.lock().await;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;

        let mut stmt =
            conn.prepare_cached("SELECT sensor, COUNT(*) FROM readings GROUP BY sensor")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut sensors = HashMap::new();
        for row in rows {
            let (sensor, count) = row?;
            sensors.insert(sensor, count as u64);
        }

        Ok(StoreStats {
            total_readings: total as u64,
            sensors,
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn row_to_reading(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reading> {
    Ok(Reading {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        unit: row.get(2)?,
        value: row.get(3)?,
    })
}
