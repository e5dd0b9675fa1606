//! Health check endpoint handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::api::{models::HealthResponse, routes::AppState};

/// Handler for GET /health
///
/// Returns basic health status without touching the database.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok", "unknown"))
}

/// Handler for GET /health/db
///
/// Returns detailed health status including database connectivity.
pub async fn health_db(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new("ok", "connected"))),
        Err(err) => {
            tracing::error!("Database health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("error", "error")),
            )
        }
    }
}
