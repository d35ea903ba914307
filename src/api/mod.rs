//! Solarium REST API
//!
//! HTTP API layer for Solarium, built with Axum.
//!
//! # Endpoints
//!
//! ## Readings
//! - `GET /api/:sensor` - List a sensor's readings
//! - `POST /api/:sensor` - Record a reading
//! - `GET /api/:sensor/count` - Count a sensor's readings
//! - `GET /api/:sensor/:id` - Get a reading
//! - `PUT /api/:sensor/:id` - Replace a reading
//! - `DELETE /api/:sensor/:id` - Delete a reading
//!
//! `:sensor` must be one of the configured sensor types (by default
//! `temperature`, `humidity`, and `light`); anything else is a 404.
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use solarium::api::{serve, ApiConfig, AppState};
//! use solarium::sensors::SensorCatalog;
//! use solarium::storage::{ReadingStore, StoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(ReadingStore::open(StoreConfig::default()).await?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, SensorCatalog::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Collection routes
        .route("/:sensor", get(routes::readings::list_readings))
        .route("/:sensor", post(routes::readings::create_reading))
        // Static segment outranks :id, so count stays reachable
        .route("/:sensor/count", get(routes::readings::count_readings))
        // Single-reading routes
        .route("/:sensor/:id", get(routes::readings::get_reading))
        .route("/:sensor/:id", put(routes::readings::update_reading))
        .route("/:sensor/:id", delete(routes::readings::delete_reading));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Solarium API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Solarium API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
