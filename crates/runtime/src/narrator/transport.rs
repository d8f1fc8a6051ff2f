//! Boundary to the external text-completion service.

use async_trait::async_trait;
use serde::Serialize;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One `{role, content}` record of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request/response call to a language model.
///
/// Implementations bound the call with a timeout and return `None` on any
/// failure (timeout, non-2xx status, malformed body); they never error out.
#[async_trait]
pub trait NarratorTransport: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Option<String>;
}
