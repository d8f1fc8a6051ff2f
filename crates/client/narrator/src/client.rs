//! HTTP client for the chat completions endpoint.

use async_trait::async_trait;
use reqwest::Client;
use runtime::{ChatMessage, NarratorTransport};
use serde::{Deserialize, Serialize};

use crate::config::PerplexityConfig;

#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unreadable response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("response has no message content")]
    EmptyContent,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

/// Client for Perplexity's OpenAI-compatible API.
#[derive(Clone)]
pub struct PerplexityClient {
    client: Client,
    config: PerplexityConfig,
}

impl std::fmt::Debug for PerplexityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PerplexityClient {
    /// Fails when the HTTP client cannot be set up, e.g. no TLS backend.
    pub fn new(config: PerplexityConfig) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn request(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, TransportError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let text = response.text().await.map_err(TransportError::Body)?;
        extract_content(&text).ok_or(TransportError::EmptyContent)
    }
}

#[async_trait]
impl NarratorTransport for PerplexityClient {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Option<String> {
        tracing::debug!(
            model = %self.config.model,
            max_tokens,
            messages = messages.len(),
            "narrator request"
        );
        match self.request(messages, max_tokens).await {
            Ok(content) => {
                tracing::trace!(%content, "narrator response");
                Some(content)
            }
            Err(err) => {
                tracing::warn!(%err, "narrator request failed");
                None
            }
        }
    }
}

/// Pulls `choices[0].message.content` out of a response body.
fn extract_content(body: &str) -> Option<String> {
    let response: ChatResponse = serde_json::from_str(body).ok()?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
}

// =============================================================================
// Chat completions API types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::Role;

    #[test]
    fn extracts_first_choice_content() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"narration\":\"hi\"}"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_content(body).as_deref(), Some(r#"{"narration":"hi"}"#));
    }

    #[test]
    fn missing_or_empty_content_is_absent() {
        assert_eq!(extract_content(r#"{"choices":[]}"#), None);
        assert_eq!(extract_content(r#"{"choices":[{"message":{"content":"  "}}]}"#), None);
        assert_eq!(extract_content(r#"{"choices":[{"message":{}}]}"#), None);
        assert_eq!(extract_content("<html>bad gateway</html>"), None);
    }

    #[test]
    fn request_body_matches_the_api() {
        let messages = [ChatMessage::system("be brief"), ChatMessage::user("hello")];
        let body = ChatRequest {
            model: "sonar",
            messages: &messages,
            max_tokens: 300,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "sonar");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(messages[1].role, Role::User);
    }

    #[tokio::test]
    async fn unreachable_server_yields_none() {
        let mut config = PerplexityConfig::new("test-key");
        config.base_url = "http://127.0.0.1:9/chat/completions".to_string();
        config.timeout = std::time::Duration::from_secs(2);
        let client = PerplexityClient::new(config).unwrap();
        assert_eq!(client.complete(&[ChatMessage::user("hi")], 10).await, None);
    }
}
