//! Infrastructure layer - external adapters and the HTTP surface
//!
//! This layer contains:
//! - Textgen: OpenAI-compatible chat-completion client
//! - Speech: TTS service client
//! - Storage: blob-store client for synthesized audio artifacts
//! - HTTP: the six worker endpoints
//! - Config: application configuration
//! - State: shared application state

pub mod config;
pub mod http;
pub mod speech;
pub mod state;
pub mod storage;
pub mod textgen;
