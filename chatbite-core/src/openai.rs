//! OpenAI-compatible chat completions client
//!
//! Used by the CLI against Groq's OpenAI-compatible endpoint. The base URL
//! is configurable, so any provider speaking the same contract works.

use crate::error::CompletionError;
use crate::http::get_client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default base URL (Groq's OpenAI-compatible API)
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Request payload for the chat completions API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with no messages
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Append a message to the conversation
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the temperature for sampling
    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the maximum number of tokens in the response
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// A message in the chat conversation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Content of the first choice, if non-empty after trimming
    pub fn reply(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.trim())
            .filter(|content| !content.is_empty())
    }
}

/// A single response choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message content in a response choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Send one chat completion request and return the extracted reply text.
pub async fn chat_completion(
    base_url: &str,
    request: &ChatRequest,
    api_key: &str,
) -> Result<String, CompletionError> {
    let response = get_client()
        .post(format!("{base_url}/chat/completions"))
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(CompletionError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let parsed: ChatResponse =
        serde_json::from_str(&body).map_err(|e| CompletionError::Parse(e.to_string()))?;

    match parsed.reply() {
        Some(reply) => {
            info!(model = %request.model, "chat completion finished");
            Ok(reply.to_string())
        }
        None => Err(CompletionError::EmptyResponse { raw: body }),
    }
}
