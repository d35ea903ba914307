//! Data Ingestion
//!
//! This module feeds the reading store from outside the HTTP API:
//! - CSV seeding from per-sensor sample files
//! - A polling collector that samples sensor sources and posts readings

mod collector;
mod csv_seed;

pub use collector::{Collector, SyntheticSource};
pub use csv_seed::{CsvSeeder, SeedReport};

use async_trait::async_trait;

/// A source of live sensor measurements
///
/// Implementations wrap real hardware or, for development, synthetic
/// signal generators. The collector polls each registered source on a
/// fixed interval.
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Sensor type this source feeds (e.g., "temperature")
    fn sensor(&self) -> &str;

    /// Unit attached to sampled readings
    fn unit(&self) -> &str;

    /// Take one measurement
    async fn sample(&self) -> Result<f64, IngestError>;
}

/// Errors that can occur while ingesting data
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Sensor read failed: {0}")]
    Sensor(String),

    #[error("API error: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Server unreachable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StoreError),
}
