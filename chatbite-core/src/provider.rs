//! Completion provider seam
//!
//! Each provider owns its wire shapes and response parsing entirely; callers
//! see only a reply string or a [`CompletionError`] class.

use crate::error::CompletionError;
use crate::models::ComposedMessage;
use async_trait::async_trait;

/// A chat-completion provider.
///
/// One outbound call per invocation, no retries; transient provider
/// failures surface immediately to the caller.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the composed messages and return the extracted reply text.
    async fn complete(&self, messages: &[ComposedMessage]) -> Result<String, CompletionError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}
