//! Assistant relay: drives one user message through the remote workflow.
//!
//! create thread → add message → create run → poll run → read newest
//! assistant message. Every failure is folded into a [`RelayResult`] carrying
//! the fallback text, so callers always have something to show the user.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assistant::models::{Role, RunStatus};
use crate::assistant::{AssistantApi, AssistantError};
use crate::config::RelayConfig;

/// User-facing text returned whenever the relay cannot produce a reply.
pub const FALLBACK_RESPONSE: &str = "I'm sorry, I'm having trouble responding right now. \
Please try again in a moment, or contact support at support@example.com.";

/// Outcome of relaying one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayResult {
    /// Text to show the user. Never empty.
    pub response: String,
    /// Diagnostic detail, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResult {
    pub fn success(response: String) -> Self {
        Self {
            response,
            error: None,
        }
    }

    pub fn fallback(error: &AssistantError) -> Self {
        let detail = error.to_string();
        Self {
            response: FALLBACK_RESPONSE.to_string(),
            error: Some(if detail.is_empty() {
                "Unknown error".to_string()
            } else {
                detail
            }),
        }
    }
}

/// Suspends the polling loop between status checks.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Stateless orchestrator; one value is shared by all requests.
#[derive(Clone)]
pub struct AssistantRelay {
    config: RelayConfig,
    api: Arc<dyn AssistantApi>,
    sleeper: Arc<dyn Sleeper>,
}

impl AssistantRelay {
    pub fn new(config: RelayConfig, api: Arc<dyn AssistantApi>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            config,
            api,
            sleeper,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay `message` and return the reply, or the fallback on any failure.
    pub async fn relay(&self, message: &str) -> RelayResult {
        info!(chars = message.chars().count(), "relaying message");
        match self.try_relay(message).await {
            Ok(reply) => {
                info!(chars = reply.chars().count(), "relay completed");
                RelayResult::success(reply)
            }
            Err(e) => {
                warn!(error = %e, "relay failed, returning fallback");
                RelayResult::fallback(&e)
            }
        }
    }

    async fn try_relay(&self, message: &str) -> Result<String, AssistantError> {
        let assistant_id = self.check_credentials()?;

        let thread_id = self.create_session().await?;
        self.post_message(&thread_id, message).await?;
        let run_id = self.start_run(&thread_id, assistant_id).await?;
        self.poll_run(&thread_id, &run_id).await?;
        self.fetch_reply(&thread_id).await
    }

    /// Returns the configured assistant id once both credentials are present.
    fn check_credentials(&self) -> Result<&str, AssistantError> {
        if self.config.api_key().is_none() {
            return Err(AssistantError::Configuration(
                "OPENAI_API_KEY is not configured".into(),
            ));
        }
        self.config.assistant_id().ok_or_else(|| {
            AssistantError::Configuration("OPENAI_ASSISTANT_ID is not configured".into())
        })
    }

    /// Create a fresh thread for this request.
    pub async fn create_session(&self) -> Result<String, AssistantError> {
        self.api.create_thread().await
    }

    pub async fn post_message(&self, thread_id: &str, text: &str) -> Result<(), AssistantError> {
        self.api.add_user_message(thread_id, text).await
    }

    pub async fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, AssistantError> {
        self.api.create_run(thread_id, assistant_id).await
    }

    /// Poll until the run completes, fails, or the attempt cap is reached.
    ///
    /// Each status check is preceded by one poll interval of sleep.
    pub async fn poll_run(&self, thread_id: &str, run_id: &str) -> Result<(), AssistantError> {
        let max_attempts = self.config.max_poll_attempts;

        for attempt in 1..=max_attempts {
            self.sleeper.sleep(self.config.poll_interval).await;

            let run = self.api.get_run(thread_id, run_id).await?;
            debug!(run_id, attempt, status = %run.status, "polled run");

            match run.status {
                RunStatus::Completed => return Ok(()),
                status if status.is_unrecoverable() => {
                    return Err(AssistantError::RunFailed {
                        status: status.to_string(),
                    });
                }
                _ => {}
            }
        }

        Err(AssistantError::RunTimeout {
            attempts: max_attempts,
        })
    }

    /// Text of the first content block of the newest assistant message.
    pub async fn fetch_reply(&self, thread_id: &str) -> Result<String, AssistantError> {
        let messages = self.api.list_messages(thread_id).await?;

        let newest = messages
            .into_iter()
            .find(|m| m.role == Role::Assistant)
            .ok_or_else(|| {
                AssistantError::ReplyExtraction("no assistant message in thread".into())
            })?;

        let block = newest.content.into_iter().next().ok_or_else(|| {
            AssistantError::ReplyExtraction(format!("assistant message {} is empty", newest.id))
        })?;

        match (block.kind.as_str(), block.text) {
            ("text", Some(text)) if text.value.trim().is_empty() => Err(
                AssistantError::ReplyExtraction(format!("assistant reply {} is empty", newest.id)),
            ),
            ("text", Some(text)) => Ok(text.value),
            (kind, _) => Err(AssistantError::ReplyExtraction(format!(
                "unexpected content type: {kind}"
            ))),
        }
    }
}
