//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Text-generation API base URL (OpenAI-compatible)
    pub textgen_base_url: String,
    /// Default model for text-generation requests
    pub textgen_model: String,

    /// TTS service URL
    pub tts_base_url: String,

    /// Blob-store URL. Unset means synthesized audio is not persisted and
    /// segments carry no artifact URI.
    pub storage_base_url: Option<String>,
    /// Bucket the audio artifacts land in
    pub storage_bucket: String,

    /// Quality gate threshold the QualityAssurer compares against
    pub target_quality: f64,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            textgen_base_url: env::var("TEXTGEN_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            textgen_model: env::var("TEXTGEN_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),

            tts_base_url: env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5002".to_string()),

            storage_base_url: env::var("STORAGE_BASE_URL").ok(),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "vertice-audio".to_string()),

            target_quality: env::var("TARGET_QUALITY")
                .unwrap_or_else(|_| "9.0".to_string())
                .parse()
                .context("TARGET_QUALITY must be a valid number")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
