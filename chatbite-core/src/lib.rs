pub mod config;
pub mod error;
pub mod gemini;
pub mod http;
pub mod models;
pub mod openai;
pub mod prompt;
pub mod provider;

// Re-export commonly used types
pub use config::{Config, resolve_api_key};
pub use error::{CompletionError, ComposeError};
pub use gemini::GeminiClient;
pub use models::{ChatTurn, ComposedMessage, Role};
pub use prompt::{Directive, PromptRequest, compose};
pub use provider::CompletionClient;
