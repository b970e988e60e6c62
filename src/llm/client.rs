//! Reqwest-backed chat-completion client.
//!
//! Request and response payloads are private serde structs carrying just
//! the fields the bot touches; everything else in the API response is
//! ignored. Outbound calls rely on the transport's default timeouts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::error::LlmError;

/// Upper bound on generated review length, in tokens.
const MAX_TOKENS: u32 = 1000;
/// Low temperature keeps reviews close to deterministic.
const TEMPERATURE: f64 = 0.3;

/// A chat-completion client for Groq's OpenAI-compatible API.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config) -> GroqClient {
        let base = config.groq_api_base.trim_end_matches('/');
        GroqClient {
            http: reqwest::Client::new(),
            url: format!("{}/openai/v1/chat/completions", base),
            api_key: config.groq_api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Requests a chat completion and returns the first choice's content.
    ///
    /// `system` is the review instruction; `user` is the diff. Output length
    /// and temperature are fixed.
    ///
    /// # Errors
    ///
    /// [`LlmError::Http`] for non-success statuses, [`LlmError::Decode`]
    /// when the body is not the expected shape, [`LlmError::EmptyChoices`] /
    /// [`LlmError::MissingContent`] when the expected fields are absent.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, user_len = user.len(), "requesting chat completion");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status,
                url: self.url.clone(),
                snippet: snippet(&text),
            });
        }

        let text = response.text().await?;
        debug!(raw = %text, "completion response");
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;

        extract_content(parsed)
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Pulls the first choice's message content out of a completion response.
fn extract_content(response: ChatCompletionResponse) -> Result<String, LlmError> {
    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyChoices)?;
    first.message.content.ok_or(LlmError::MissingContent)
}

/// Truncates `text` to at most 200 characters for error reporting.
fn snippet(text: &str) -> String {
    if text.chars().count() <= 200 {
        text.to_string()
    } else {
        let head: String = text.chars().take(200).collect();
        format!("{}...", head)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
