//! # Solarium
//!
//! Environmental Sensor Telemetry - A full-stack Rust application for
//! recording, serving, and charting greenhouse sensor readings.
//!
//! ## Features
//!
//! - **SQLite storage**: single readings table in WAL mode, listings in
//!   insertion order
//! - **REST API**: per-sensor CRUD endpoints built with Axum
//! - **Seeding**: sample CSV files for development data
//! - **Collection**: polls sensor sources and posts readings on an interval
//!
//! ## Modules
//!
//! - [`storage`]: SQLite-backed reading store
//! - [`sensors`]: Sensor catalog (types and default units)
//! - [`api`]: REST API server with Axum
//! - [`ingest`]: CSV seeding and the reading collector
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solarium::storage::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open the store
//!     let store = ReadingStore::open(StoreConfig::default()).await?;
//!
//!     // Record a reading
//!     let reading = store
//!         .insert("temperature", NewReading::now("C", 21.5))
//!         .await?;
//!     println!("Recorded reading {}", reading.id);
//!
//!     // List in recorded order
//!     let readings = store.list("temperature", &ReadingQuery::new()).await?;
//!     println!("Found {} readings", readings.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod ingest;
pub mod sensors;
pub mod storage;
pub mod timeparse;

// Re-export top-level types for convenience
pub use storage::{
    NewReading, OrderBy, Reading, ReadingQuery, ReadingStore, StoreConfig, StoreError,
    StoreResult, StoreStats,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use sensors::{SensorCatalog, SensorSpec};

pub use ingest::{
    Collector, CsvSeeder, IngestError, SeedReport, SensorSource, SyntheticSource,
};

pub use config::{Config, ConfigError};

pub use timeparse::{parse_timestamp, TimeParseError, TIMESTAMP_FORMAT};
