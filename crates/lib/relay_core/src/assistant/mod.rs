//! Assistant module: access to the hosted assistant API.
//!
//! The remote service keeps conversations as threads. A reply is produced by
//! appending a user message to a thread and starting a run, which the caller
//! polls until the assistant has written its answer back to the thread.
//!
//! # Public API
//!
//! - [`AssistantApi`]: the five remote calls the relay needs
//! - [`openai::HttpAssistantClient`]: `AssistantApi` over HTTP (Assistants v2)
//! - [`AssistantError`]: error taxonomy shared by the client and the relay

pub mod models;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

use models::{Run, ThreadMessage};

/// Errors that can occur while relaying a message to the assistant.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("Run failed with status: {status}")]
    RunFailed { status: String },

    #[error("Run timed out after {attempts} status checks")]
    RunTimeout { attempts: u32 },

    #[error("Reply extraction failed: {0}")]
    ReplyExtraction(String),
}

/// Remote operations against the hosted assistant service.
///
/// Implementations map non-success responses and transport failures to
/// [`AssistantError::RemoteService`].
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Create an empty thread and return its id.
    async fn create_thread(&self) -> Result<String, AssistantError>;

    /// Append a user message to a thread.
    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<(), AssistantError>;

    /// Start a run of `assistant_id` on a thread and return the run id.
    async fn create_run(&self, thread_id: &str, assistant_id: &str)
    -> Result<String, AssistantError>;

    /// Fetch the current state of a run.
    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError>;

    /// List a thread's messages, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError>;
}
