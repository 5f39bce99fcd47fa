use anyhow::{Context, Result};

/// Environment variables checked, in priority order, for a Gemini API key
pub const GEMINI_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Environment variables checked, in priority order, for a Groq API key
pub const GROQ_KEY_VARS: &[&str] = &["GROQ_API_KEY", "API_KEY"];

/// Default Gemini model used when CHATBITE_MODEL env var is not set
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

const DEFAULT_TEMPERATURE: f32 = 0.5;
const DEFAULT_TOP_P: f32 = 0.9;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 700;

/// Return the first non-empty value among the named environment variables.
pub fn resolve_api_key(vars: &[&str]) -> Option<String> {
    resolve_api_key_with(vars, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`] with an injectable lookup, so the priority
/// order can be tested without touching process environment.
pub fn resolve_api_key_with<F>(vars: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
}

/// Application configuration from environment
///
/// Built once at process start and treated as read-only afterwards. A
/// missing API key is a startup failure, not a per-request one.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Config {
    /// Load configuration from .env file and environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Not an error if .env is absent

        let api_key = resolve_api_key(GEMINI_KEY_VARS).with_context(|| {
            format!(
                "{} is not set. Provide a Gemini API key in your environment.",
                GEMINI_KEY_VARS.join(" / ")
            )
        })?;

        let model =
            std::env::var("CHATBITE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = std::env::var("CHATBITE_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
            .parse()
            .context("Invalid CHATBITE_TEMPERATURE")?;

        let top_p = std::env::var("CHATBITE_TOP_P")
            .unwrap_or_else(|_| DEFAULT_TOP_P.to_string())
            .parse()
            .context("Invalid CHATBITE_TOP_P")?;

        let max_output_tokens = std::env::var("CHATBITE_MAX_OUTPUT_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_OUTPUT_TOKENS.to_string())
            .parse()
            .context("Invalid CHATBITE_MAX_OUTPUT_TOKENS")?;

        Ok(Self {
            api_key,
            model,
            temperature,
            top_p,
            max_output_tokens,
        })
    }
}
