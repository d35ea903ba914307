//! Core data types for the Solarium reading store
//!
//! This module defines the fundamental types used throughout the storage layer:
//! - `Reading`: A single stored sensor measurement
//! - `NewReading`: A measurement about to be stored (no id yet)
//! - `ReadingQuery`: Filter and ordering options for listing readings
//! - `StoreStats`: Aggregate counts for health reporting

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single stored sensor reading
///
/// Represents one measurement at a specific point in time, as returned
/// by the store and serialized by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Row identifier assigned by the store
    pub id: i64,
    /// Timestamp label in `%Y-%m-%d %H:%M:%S` form
    pub timestamp: String,
    /// Unit of measurement (e.g., "C", "%", "lux")
    pub unit: String,
    /// The measured value
    pub value: f64,
}

/// A reading that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReading {
    /// Timestamp label in `%Y-%m-%d %H:%M:%S` form
    pub timestamp: String,
    /// Unit of measurement
    pub unit: String,
    /// The measured value
    pub value: f64,
}

impl NewReading {
    /// Create a reading with an explicit timestamp
    pub fn new(timestamp: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            unit: unit.into(),
            value,
        }
    }

    /// Create a reading stamped with the current local time
    pub fn now(unit: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: crate::timeparse::now_string(),
            unit: unit.into(),
            value,
        }
    }
}

/// Column to order listings by
///
/// The default listing order is insertion order (`ORDER BY id`), which
/// preserves the sequence readings arrived in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Order by the timestamp column
    Timestamp,
    /// Order by the measured value
    Value,
}

impl OrderBy {
    /// Column name for SQL ORDER BY clauses
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderBy::Timestamp => "timestamp",
            OrderBy::Value => "value",
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Filter and ordering options for listing readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingQuery {
    /// Inclusive lower timestamp bound, canonical form
    pub start: Option<String>,
    /// Inclusive upper timestamp bound, canonical form
    pub end: Option<String>,
    /// Ordering column; insertion order when absent
    pub order: Option<OrderBy>,
}

impl ReadingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the inclusive start bound
    pub fn start(mut self, timestamp: impl Into<String>) -> Self {
        self.start = Some(timestamp.into());
        self
    }

    /// Builder: set the inclusive end bound
    pub fn end(mut self, timestamp: impl Into<String>) -> Self {
        self.end = Some(timestamp.into());
        self
    }

    /// Builder: set the ordering column
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }
}

/// Aggregate store statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total readings across all sensors
    pub total_readings: u64,
    /// Reading counts per sensor
    pub sensors: HashMap<String, u64>,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.sensors.keys().map(String::as_str).collect();
        names.sort_unstable();
        write!(
            f,
            "{} readings across {} sensors ({})",
            self.total_readings,
            self.sensors.len(),
            names.join(", ")
        )
    }
}
