//! Text-generation port - prompt in, free text out

use async_trait::async_trait;

/// A single completion request. The response is free text the caller parses
/// as JSON-if-possible with a heuristic fallback.
#[derive(Debug, Clone)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl TextGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.2,
            max_output_tokens: 1024,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextGenerationResponse {
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TextGenerationError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("model API error: {0}")]
    Api(String),
}

#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    async fn generate(
        &self,
        request: TextGenerationRequest,
    ) -> Result<TextGenerationResponse, TextGenerationError>;
}
