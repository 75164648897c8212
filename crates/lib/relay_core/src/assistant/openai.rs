//! HTTP client for the OpenAI Assistants API (v2).
//!
//! Every request carries the bearer credential and the `OpenAI-Beta` header
//! that opts into the Assistants v2 surface.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{
    CreateMessageRequest, CreateRunRequest, CreatedObject, MessageList, Run, ThreadMessage,
};
use super::{AssistantApi, AssistantError};
use crate::config::RelayConfig;

const BETA_HEADER: &str = "OpenAI-Beta";
const BETA_VALUE: &str = "assistants=v2";

/// [`AssistantApi`] implementation backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpAssistantClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpAssistantClient {
    /// Build a client from relay configuration.
    ///
    /// A missing API key is not an error here; the relay rejects the request
    /// before any call is made.
    pub fn from_config(config: &RelayConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AssistantError::Configuration(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().unwrap_or_default().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER, BETA_VALUE)
    }

    /// Send a request and decode a successful JSON response.
    ///
    /// `action` names the step in error messages ("create thread", ...).
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &str,
    ) -> Result<T, AssistantError> {
        let resp = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| AssistantError::RemoteService(format!("Failed to {action}: {e}")))?;

        let resp = ensure_success(resp, action).await?;

        resp.json().await.map_err(|e| {
            AssistantError::RemoteService(format!("Failed to {action}: response parse error: {e}"))
        })
    }
}

async fn ensure_success(resp: Response, action: &str) -> Result<Response, AssistantError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    Err(AssistantError::RemoteService(format!(
        "Failed to {action}: {status} {body}"
    )))
}

#[async_trait]
impl AssistantApi for HttpAssistantClient {
    async fn create_thread(&self) -> Result<String, AssistantError> {
        let builder = self
            .client
            .post(self.url("/threads"))
            .json(&serde_json::json!({}));
        let created: CreatedObject = self.send(builder, "create thread").await?;
        debug!(thread_id = %created.id, "thread created");
        Ok(created.id)
    }

    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<(), AssistantError> {
        let builder = self
            .client
            .post(self.url(&format!("/threads/{thread_id}/messages")))
            .json(&CreateMessageRequest {
                role: "user",
                content: text,
            });
        let created: CreatedObject = self.send(builder, "add message").await?;
        debug!(thread_id, message_id = %created.id, "message added");
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, AssistantError> {
        let builder = self
            .client
            .post(self.url(&format!("/threads/{thread_id}/runs")))
            .json(&CreateRunRequest { assistant_id });
        let created: CreatedObject = self.send(builder, "create run").await?;
        debug!(thread_id, run_id = %created.id, "run created");
        Ok(created.id)
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        let builder = self
            .client
            .get(self.url(&format!("/threads/{thread_id}/runs/{run_id}")));
        self.send(builder, "check run status").await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        let builder = self
            .client
            .get(self.url(&format!("/threads/{thread_id}/messages")))
            .query(&[("order", "desc")]);
        let list: MessageList = self.send(builder, "list messages").await?;
        Ok(list.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = RelayConfig {
            base_url: "http://localhost:9999/v1/".into(),
            ..RelayConfig::default()
        };
        let client = HttpAssistantClient::from_config(&config).expect("client");
        assert_eq!(client.url("/threads"), "http://localhost:9999/v1/threads");
    }

    #[test]
    fn missing_key_builds_client_with_empty_credential() {
        let client = HttpAssistantClient::from_config(&RelayConfig::default()).expect("client");
        assert!(client.api_key.is_empty());
    }
}
