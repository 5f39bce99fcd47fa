//! Shared HTTP client
//!
//! A single lazily-initialized reqwest client is reused for all outbound
//! completion calls, so connections are pooled across requests.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Request timeout for completion calls in seconds
///
/// There is no retry or cancellation logic above this layer; a hung
/// provider call is bounded by this timeout alone.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client
pub fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(concat!("chatbite/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}
