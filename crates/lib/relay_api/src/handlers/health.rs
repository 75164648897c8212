//! Health check endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health`: reports version and whether credentials are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: relay_core::version().to_string(),
        configured: state.relay.config().is_configured(),
    })
}
