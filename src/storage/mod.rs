//! Solarium reading store
//!
//! This module provides reading persistence for the API and the seeder:
//!
//! - **types**: Core data structures (Reading, NewReading, ReadingQuery)
//! - **store**: SQLite-backed reading store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use solarium::storage::{NewReading, ReadingQuery, ReadingStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ReadingStore::open(StoreConfig::new("./data")).await?;
//!
//!     store
//!         .insert("temperature", NewReading::now("C", 21.5))
//!         .await?;
//!
//!     let readings = store.list("temperature", &ReadingQuery::new()).await?;
//!     println!("{} temperature readings", readings.len());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use store::{ReadingStore, StoreConfig};
pub use types::{NewReading, OrderBy, Reading, ReadingQuery, StoreStats};
