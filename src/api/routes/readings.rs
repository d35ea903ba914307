//! Reading Routes
//!
//! CRUD endpoints for a single sensor's readings.
//!
//! - GET /api/:sensor - List readings
//! - POST /api/:sensor - Record a reading
//! - GET /api/:sensor/count - Count readings
//! - GET /api/:sensor/:id - Fetch one reading
//! - PUT /api/:sensor/:id - Replace one reading
//! - DELETE /api/:sensor/:id - Remove one reading

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CountResponse, ListParams, ReadingRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::sensors::SensorSpec;
use crate::storage::{NewReading, Reading, ReadingQuery};
use crate::timeparse;

/// GET /api/:sensor
///
/// List a sensor's readings as a bare JSON array. Without `order-by` the
/// rows come back in the order they were recorded; `start`/`end` bound
/// the range inclusively and accept the same timestamp forms as ingest.
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
    Path(sensor): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Reading>>> {
    lookup_sensor(&state, &sensor)?;

    let mut query = ReadingQuery::new();
    if let Some(start) = &params.start {
        query = query.start(timeparse::canonicalize(start)?);
    }
    if let Some(end) = &params.end {
        query = query.end(timeparse::canonicalize(end)?);
    }
    if let Some(order) = params.order_by {
        query = query.order(order);
    }

    let readings = state.store.list(&sensor, &query).await?;
    Ok(Json(readings))
}

/// POST /api/:sensor
///
/// Record a reading. Omitted timestamp defaults to now, omitted unit to
/// the sensor's catalog unit.
pub async fn create_reading(
    State(state): State<Arc<AppState>>,
    Path(sensor): Path<String>,
    Json(req): Json<ReadingRequest>,
) -> ApiResult<(StatusCode, Json<Reading>)> {
    let spec = lookup_sensor(&state, &sensor)?;
    validate_reading(&req)?;
    let reading = resolve_reading(spec, &req)?;

    let created = state.store.insert(&sensor, reading).await?;

    tracing::debug!(
        sensor = %sensor,
        id = created.id,
        value = created.value,
        "Recorded reading"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/:sensor/count
pub async fn count_readings(
    State(state): State<Arc<AppState>>,
    Path(sensor): Path<String>,
) -> ApiResult<Json<CountResponse>> {
    lookup_sensor(&state, &sensor)?;

    let count = state.store.count(&sensor).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/:sensor/:id
pub async fn get_reading(
    State(state): State<Arc<AppState>>,
    Path((sensor, id)): Path<(String, i64)>,
) -> ApiResult<Json<Reading>> {
    lookup_sensor(&state, &sensor)?;

    let reading = state
        .store
        .get(&sensor, id)
        .await?
        .ok_or_else(|| not_found(&sensor, id))?;

    Ok(Json(reading))
}

/// PUT /api/:sensor/:id
///
/// Replace a reading's fields. Defaults apply the same way as on create.
pub async fn update_reading(
    State(state): State<Arc<AppState>>,
    Path((sensor, id)): Path<(String, i64)>,
    Json(req): Json<ReadingRequest>,
) -> ApiResult<Json<Reading>> {
    let spec = lookup_sensor(&state, &sensor)?;
    validate_reading(&req)?;
    let reading = resolve_reading(spec, &req)?;

    let updated = state
        .store
        .update(&sensor, id, reading)
        .await?
        .ok_or_else(|| not_found(&sensor, id))?;

    Ok(Json(updated))
}

/// DELETE /api/:sensor/:id
pub async fn delete_reading(
    State(state): State<Arc<AppState>>,
    Path((sensor, id)): Path<(String, i64)>,
) -> ApiResult<StatusCode> {
    lookup_sensor(&state, &sensor)?;

    if !state.store.delete(&sensor, id).await? {
        return Err(not_found(&sensor, id));
    }

    tracing::debug!(sensor = %sensor, id, "Deleted reading");
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a sensor name against the catalog
fn lookup_sensor<'a>(state: &'a AppState, sensor: &str) -> ApiResult<&'a SensorSpec> {
    state
        .sensors
        .get(sensor)
        .ok_or_else(|| ApiError::SensorNotFound(sensor.to_string()))
}

/// Validate a reading request body
fn validate_reading(req: &ReadingRequest) -> ApiResult<()> {
    if !req.value.is_finite() {
        return Err(ApiError::Validation(
            "Value must be a finite number".to_string(),
        ));
    }

    if let Some(unit) = &req.unit {
        if unit.is_empty() {
            return Err(ApiError::Validation("Unit cannot be empty".to_string()));
        }
        if unit.len() > 20 {
            return Err(ApiError::Validation(
                "Unit exceeds maximum length of 20 characters".to_string(),
            ));
        }
    }

    Ok(())
}

/// Fill in defaults and canonicalize the timestamp
fn resolve_reading(spec: &SensorSpec, req: &ReadingRequest) -> ApiResult<NewReading> {
    let timestamp = match &req.timestamp {
        Some(raw) => timeparse::canonicalize(raw)?,
        None => timeparse::now_string(),
    };
    let unit = req.unit.clone().unwrap_or_else(|| spec.unit.clone());

    Ok(NewReading::new(timestamp, unit, req.value))
}

fn not_found(sensor: &str, id: i64) -> ApiError {
    ApiError::NotFound(format!("No {} reading with id {}", sensor, id))
}
