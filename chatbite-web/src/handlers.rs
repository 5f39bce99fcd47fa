//! Chat endpoint
//!
//! Stateless per-request flow: parse, validate, compose, complete, respond.
//! Every failure is terminal for the request and maps to a fixed user-facing
//! body; provider detail is logged server-side only.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chatbite_core::{
    ChatTurn, CompletionClient, CompletionError, ComposeError, PromptRequest, compose,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, warn};

/// Fixed user-facing error wording, one message per failure class
pub const INVALID_JSON: &str = "Invalid JSON payload.";
pub const MISSING_MESSAGE: &str = "Please describe the ingredients you have.";
pub const PROVIDER_BUSY: &str =
    "The kitchen is a little busy right now. Please try again in a moment.";
pub const EMPTY_REPLY: &str =
    "I couldn't find the right words this time. Try another ingredient combo!";

/// Shared read-only state behind the endpoint
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
}

/// Request body for POST /api/chat
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub dietary_preference: Option<String>,
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<ChatTurn>,
}

/// History comes from arbitrary clients; a wrong-typed entry must be dropped
/// by the composer, not fail the whole request. Anything that is not an
/// array of objects with string fields degrades to turns the composer skips.
fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<ChatTurn>, D::Error>
where
    D: Deserializer<'de>,
{
    let turns = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => entries.into_iter().map(turn_from_value).collect(),
        _ => Vec::new(),
    };
    Ok(turns)
}

fn turn_from_value(entry: Value) -> ChatTurn {
    let role = entry.get("role").and_then(Value::as_str).unwrap_or_default();
    let content = entry
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default();
    ChatTurn::new(role, content)
}

impl From<ChatPayload> for PromptRequest {
    fn from(payload: ChatPayload) -> Self {
        PromptRequest {
            message: payload.message,
            meal_type: payload.meal_type,
            dietary_preference: payload.dietary_preference,
            skill_level: payload.skill_level,
            history: payload.history,
        }
    }
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": INVALID_JSON })));
    };
    respond(state.client.as_ref(), payload).await
}

/// Endpoint flow past JSON parsing, driven directly by tests with a stub
/// client.
async fn respond(
    client: &dyn CompletionClient,
    payload: ChatPayload,
) -> (StatusCode, Json<Value>) {
    let messages = match compose(&PromptRequest::from(payload)) {
        Ok(messages) => messages,
        Err(ComposeError::EmptyMessage) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": MISSING_MESSAGE })),
            );
        }
    };

    match client.complete(&messages).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "reply": reply }))),
        Err(CompletionError::EmptyResponse { raw }) => {
            warn!(
                provider = client.provider_name(),
                raw = %raw,
                "provider returned an empty response"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": EMPTY_REPLY })),
            )
        }
        Err(err) => {
            error!(
                provider = client.provider_name(),
                error = %err,
                "chat completion failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": PROVIDER_BUSY })),
            )
        }
    }
}
