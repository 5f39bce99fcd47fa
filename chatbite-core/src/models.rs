use serde::{Deserialize, Serialize};

/// One caller-supplied turn of conversation history.
///
/// The role stays a raw string on the wire: the prompt composer silently
/// drops turns with roles outside `user`/`assistant` instead of failing the
/// whole request over one bad entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Provider-facing message role.
///
/// Gemini's chat contract knows only `user` and `model`; history turns from
/// the browser arrive as `assistant` and are mapped during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Provider-facing message produced by the prompt composer.
///
/// Ordering within a composed sequence is significant: guidance first, then
/// history in original order, then the new user message last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedMessage {
    pub role: Role,
    pub text: String,
}

impl ComposedMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}
