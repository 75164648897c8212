//! Chat request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use relay_core::RelayResult;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::ChatRequest;

/// `POST /api/chat`: relay a user message to the assistant.
///
/// The body is parsed as JSON whatever its content type. Remote failures
/// still answer 200 with the fallback text; only a missing message (400) or
/// a body that does not fit [`ChatRequest`], such as a non-string `message`
/// (500), produce error statuses.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RelayResult>> {
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("Failed to parse chat request: {e}")))?;

    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Message is required".into()))?;

    if let Some(requested) = request.assistant_id.as_deref() {
        debug!(requested, "ignoring per-request assistant id");
    }

    Ok(Json(state.relay.relay(&message).await))
}

/// `OPTIONS /api/chat`: CORS pre-flight. Headers come from the router layers.
pub async fn chat_preflight_handler() -> StatusCode {
    StatusCode::OK
}
