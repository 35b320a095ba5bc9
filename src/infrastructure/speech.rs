//! TTS service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::outbound::{
    SpeechRequest, SpeechSynthesisError, SpeechSynthesisPort, SynthesizedSpeech,
};

/// Client for the speech-synthesis service. The service takes SSML plus
/// voice parameters and answers with raw MP3 bytes.
#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    base_url: String,
}

impl SpeechClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesisPort for SpeechClient {
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
        let body = SynthesizeRequest {
            ssml: &request.ssml,
            language_code: &request.language_code,
            voice_name: &request.voice_name,
            speaking_rate: request.speaking_rate,
            pitch: request.pitch,
            volume_gain_db: request.volume_gain_db,
            audio_encoding: "MP3",
        };

        let response = self
            .client
            .post(format!("{}/synthesize", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| SpeechSynthesisError::Http(e.to_string()))?;
            return Err(SpeechSynthesisError::Api(error_text));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::Http(e.to_string()))?;

        Ok(SynthesizedSpeech {
            audio: audio.to_vec(),
            encoding: "mp3".to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    ssml: &'a str,
    language_code: &'a str,
    voice_name: &'a str,
    speaking_rate: f64,
    pitch: f64,
    volume_gain_db: f64,
    audio_encoding: &'a str,
}
