//! # relay_api
//!
//! HTTP API library for Assistant Relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use relay_core::assistant::openai::HttpAssistantClient;
use relay_core::{AssistantError, AssistantRelay, RelayConfig, TokioSleeper};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::{chat, health};

/// Route paths.
pub mod routes {
    pub const POST_API_CHAT: &str = "/api/chat";
    pub const GET_API_HEALTH: &str = "/api/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay shared by all requests; it holds no per-request state.
    pub relay: Arc<AssistantRelay>,
}

impl AppState {
    /// Builds state backed by the HTTP assistant client and the tokio timer.
    pub fn from_config(config: &RelayConfig) -> Result<Self, AssistantError> {
        let client = HttpAssistantClient::from_config(config)?;
        let relay = AssistantRelay::new(config.clone(), Arc::new(client), Arc::new(TokioSleeper));
        Ok(Self {
            relay: Arc::new(relay),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Every response carries permissive CORS headers, including pre-flight
/// replies, whatever the request looked like.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            routes::POST_API_CHAT,
            post(chat::chat_handler).options(chat::chat_preflight_handler),
        )
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}
