//! Speech-synthesis port - SSML plus voice parameters in, audio bytes out

use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub ssml: String,
    pub language_code: String,
    pub voice_name: String,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub volume_gain_db: f64,
}

/// Opaque synthesized audio. The pipeline never inspects the bytes; it only
/// sizes them and, when a blob store is configured, persists them.
#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub audio: Vec<u8>,
    pub encoding: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesisError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("TTS API error: {0}")]
    Api(String),
}

#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SynthesizedSpeech, SpeechSynthesisError>;
}
