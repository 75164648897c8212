//! Wire types for the Assistants API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response body carrying just an object id (thread or run creation).
#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
}

/// Lifecycle status of a run.
///
/// Statuses this crate does not know about are kept verbatim in
/// [`RunStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Incomplete,
    Other(String),
}

impl RunStatus {
    /// The status string as the remote service spells it.
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Other(s) => s,
        }
    }

    /// Terminal statuses that can never turn into `completed`.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "cancelling" => RunStatus::Cancelling,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            "cancelled" => RunStatus::Cancelled,
            "expired" => RunStatus::Expired,
            "incomplete" => RunStatus::Incomplete,
            _ => RunStatus::Other(s),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

/// Author of a thread message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    pub data: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// One block of message content. Only `text` blocks carry a [`TextContent`].
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"in_progress"}"#)
            .expect("parse run");
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(!run.status.is_unrecoverable());
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"paused"}"#)
            .expect("parse run");
        assert_eq!(run.status, RunStatus::Other("paused".into()));
        assert_eq!(run.status.to_string(), "paused");
    }

    #[test]
    fn unrecoverable_statuses() {
        assert!(RunStatus::Failed.is_unrecoverable());
        assert!(RunStatus::Cancelled.is_unrecoverable());
        assert!(RunStatus::Expired.is_unrecoverable());
        assert!(!RunStatus::Completed.is_unrecoverable());
        assert!(!RunStatus::Incomplete.is_unrecoverable());
    }

    #[test]
    fn message_list_parses_text_and_image_blocks() {
        let json = r#"{
            "object": "list",
            "data": [
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": {"value": "Hi!", "annotations": []}},
                        {"type": "image_file", "image_file": {"file_id": "file_1"}}
                    ]
                },
                {"id": "msg_1", "role": "user", "content": []}
            ]
        }"#;
        let list: MessageList = serde_json::from_str(json).expect("parse list");
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].role, Role::Assistant);
        assert_eq!(list.data[0].content[0].kind, "text");
        assert_eq!(
            list.data[0].content[0].text.as_ref().map(|t| t.value.as_str()),
            Some("Hi!")
        );
        assert!(list.data[0].content[1].text.is_none());
        assert_eq!(list.data[1].role, Role::User);
    }
}
