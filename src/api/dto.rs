//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::storage::{OrderBy, StoreStats};
use serde::{Deserialize, Serialize};

// ============================================
// READING DTOs
// ============================================

/// Body for creating or replacing a reading
///
/// `timestamp` accepts the canonical `%Y-%m-%d %H:%M:%S` form plus ISO
/// 8601, date-only, epoch, and relative (`now-1h`) expressions; omitted
/// fields fall back to the current time and the sensor's catalog unit.
#[derive(Debug, Deserialize)]
pub struct ReadingRequest {
    /// Value to record
    pub value: f64,
    /// Optional unit, defaults to the sensor's configured unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Optional timestamp, defaults to now
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Query parameters for listing a sensor's readings
///
/// The hyphenated `order-by` name matches what the dashboard sends; the
/// underscore form is accepted as well. Date bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Ordering column: "timestamp" or "value"; insertion order when absent
    #[serde(default, rename = "order-by", alias = "order_by")]
    pub order_by: Option<OrderBy>,
    /// Inclusive lower timestamp bound
    #[serde(default, alias = "start_date")]
    pub start: Option<String>,
    /// Inclusive upper timestamp bound
    #[serde(default, alias = "end_date")]
    pub end: Option<String>,
}

/// Response for GET /api/:sensor/count
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of stored readings for the sensor
    pub count: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Storage component status: ok, error
    pub storage: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
    /// Reading counts, present when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_request_optional_fields() {
        let req: ReadingRequest = serde_json::from_str(r#"{"value": 21.5}"#).unwrap();
        assert_eq!(req.value, 21.5);
        assert!(req.unit.is_none());
        assert!(req.timestamp.is_none());

        let req: ReadingRequest = serde_json::from_str(
            r#"{"value": 55.0, "unit": "%", "timestamp": "2024-01-01 00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(req.unit.as_deref(), Some("%"));
        assert_eq!(req.timestamp.as_deref(), Some("2024-01-01 00:00:00"));
    }

    #[test]
    fn test_list_params_accepts_hyphen_and_underscore() {
        let params: ListParams =
            serde_json::from_str(r#"{"order-by": "timestamp"}"#).unwrap();
        assert_eq!(params.order_by, Some(OrderBy::Timestamp));

        let params: ListParams = serde_json::from_str(r#"{"order_by": "value"}"#).unwrap();
        assert_eq!(params.order_by, Some(OrderBy::Value));

        let params: ListParams = serde_json::from_str(
            r#"{"start_date": "2024-01-01", "end_date": "2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(params.start.as_deref(), Some("2024-01-01"));
        assert_eq!(params.end.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_list_params_rejects_unknown_order() {
        assert!(serde_json::from_str::<ListParams>(r#"{"order-by": "id"}"#).is_err());
    }
}
