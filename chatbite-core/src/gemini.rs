//! Google Gemini generateContent client
//!
//! Serves the web chat endpoint. Reply extraction runs an ordered list of
//! strategies over the response: the aggregated top-level text field wins
//! when present, otherwise candidates are scanned in order and the first one
//! with non-empty joined part text is used.

use crate::config::Config;
use crate::error::CompletionError;
use crate::http::get_client;
use crate::models::{ComposedMessage, Role};
use crate::provider::CompletionClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request payload for the generateContent API
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// One message in the conversation
#[derive(Debug, Serialize)]
struct Content<'a> {
    role: Role,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Generation parameters, camelCased per the Gemini wire format
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Response from the generateContent API
///
/// Every field is optional: a success status with an empty body shape is a
/// real provider behavior and classifies as an empty response, not a parse
/// failure.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One alternative generated output
#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

type ExtractStrategy = fn(&GenerateContentResponse) -> Option<String>;

/// Extraction strategies, tried in order; first non-empty result wins
const EXTRACT_STRATEGIES: &[ExtractStrategy] =
    &[extract_aggregated_text, extract_first_candidate];

fn extract_aggregated_text(response: &GenerateContentResponse) -> Option<String> {
    response
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn extract_first_candidate(response: &GenerateContentResponse) -> Option<String> {
    for candidate in &response.candidates {
        let Some(content) = &candidate.content else {
            continue;
        };
        let joined = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let joined = joined.trim();
        if !joined.is_empty() {
            return Some(joined.to_string());
        }
    }
    None
}

/// Extract reply text from a parsed response, if any strategy yields one.
pub fn extract_reply(response: &GenerateContentResponse) -> Option<String> {
    EXTRACT_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(response))
}

/// Gemini-backed completion client.
///
/// Holds only read-only configuration; safe to share across requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: Config,
}

impl GeminiClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, messages: &[ComposedMessage]) -> Result<String, CompletionError> {
        let request = GenerateContentRequest {
            contents: messages
                .iter()
                .map(|message| Content {
                    role: message.role,
                    parts: vec![Part {
                        text: &message.text,
                    }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let url = format!("{API_BASE}/models/{}:generateContent", self.config.model);
        let start = Instant::now();

        let response = get_client()
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        let duration_ms = start.elapsed().as_millis();

        if !status.is_success() {
            warn!(status = %status, duration_ms = %duration_ms, "Gemini API error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Parse(e.to_string()))?;

        match extract_reply(&parsed) {
            Some(reply) => {
                info!(
                    model = %self.config.model,
                    duration_ms = %duration_ms,
                    "completion finished"
                );
                Ok(reply)
            }
            None => Err(CompletionError::EmptyResponse { raw: body }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
