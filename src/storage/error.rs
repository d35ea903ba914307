//! Reading store error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the reading store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying SQLite operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
