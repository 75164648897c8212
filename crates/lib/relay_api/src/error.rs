//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::FALLBACK_RESPONSE;
use thiserror::Error;
use tracing::error;

use crate::models::{ErrorResponse, InternalErrorResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Remote assistant failures never show up here; the relay turns them into a
/// normal 200 response with the fallback text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(m) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: m })).into_response()
            }
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                let body = Json(InternalErrorResponse {
                    error: "Internal server error".to_string(),
                    response: FALLBACK_RESPONSE.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = AppError::Validation("Message is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_server_error_and_hides_detail() {
        let err = AppError::Internal("body parse failed".into());
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
