//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Accepted for client compatibility; runs always use the configured assistant.
    pub assistant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 500 body; still carries a user-facing `response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalErrorResponse {
    pub error: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the API key and assistant id are both set.
    pub configured: bool,
}
