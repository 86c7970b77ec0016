//! Health check endpoint.

use axum::{routing::get, Json, Router};

use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

/// - `GET /health` - Liveness with the running version
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: crate::pkg_version().to_string(),
    })
}
