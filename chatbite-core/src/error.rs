use thiserror::Error;

/// Failure classes for one completion call.
///
/// The request handler branches on exactly two classes: [`EmptyResponse`]
/// gets its own user-facing message, everything else is reported as the
/// provider being unavailable. Provider detail never leaves the server.
///
/// [`EmptyResponse`]: CompletionError::EmptyResponse
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced a provider response
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider body could not be decoded
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The call succeeded but yielded no usable text
    #[error("provider returned an empty response")]
    EmptyResponse {
        /// Raw response body, kept for server-side diagnosis only
        raw: String,
    },
}

impl CompletionError {
    /// True when the call completed but produced no text.
    pub fn is_empty_response(&self) -> bool {
        matches!(self, CompletionError::EmptyResponse { .. })
    }
}

/// Validation failures from the prompt composer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("message must not be empty")]
    EmptyMessage,
}
