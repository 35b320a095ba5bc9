//! Vértice Engine - worker pipeline for short-form educational video production
//!
//! The engine exposes six POST workers that together take raw educational
//! text to a production plan:
//! - ContentAnalyzer scores the structure of the raw content
//! - ScriptGenerator writes the four-section narration script
//! - VisualDesigner plans illustrations, characters and animations
//! - AudioSynthesizer voices the script through a TTS service
//! - QualityAssurer gates the assembled assets against the quality target
//! - PerformanceAnalyzer scores the finished run and predicts its reach
//!
//! Orchestration between stages is the caller's job; each worker is an
//! independent endpoint.

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vertice_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vértice Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Textgen: {} ({})", config.textgen_base_url, config.textgen_model);
    tracing::info!("  TTS: {}", config.tts_base_url);
    match &config.storage_base_url {
        Some(url) => tracing::info!("  Storage: {}/{}", url, config.storage_bucket),
        None => tracing::info!("  Storage: disabled, audio artifacts are not persisted"),
    }
    tracing::info!("  Quality target: {}", config.target_quality);

    let port = config.server_port;
    let state = Arc::new(AppState::new(config));

    let app = http::create_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown signal handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
