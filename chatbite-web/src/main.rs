mod handlers;

use anyhow::{Context, Result};
use axum::{Router, routing::post};
use chatbite_core::{Config, GeminiClient};
use handlers::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Asset directory default, relative to the workspace root
const DEFAULT_STATIC_DIR: &str = "chatbite-web/static";

/// Resolve the asset directory: CHATBITE_STATIC_DIR when set, otherwise the
/// workspace-relative default (so launches from other working directories
/// can point at the installed assets).
fn static_dir() -> PathBuf {
    static_dir_with(|name| std::env::var(name).ok())
}

fn static_dir_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("CHATBITE_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    // Resolve credentials before serving anything; a missing key is fatal
    let config = Config::from_env()?;
    tracing::info!(
        model = %config.model,
        "Starting ChatBite v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState {
        client: Arc::new(GeminiClient::new(config)),
    };

    let static_dir = static_dir();
    let app = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir))
        .with_state(state);

    let addr: SocketAddr = std::env::var("CHATBITE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("Invalid CHATBITE_ADDR")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Server running at http://{addr}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
