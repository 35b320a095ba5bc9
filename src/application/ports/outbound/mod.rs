//! Outbound ports - capabilities the workers require from external services
//!
//! Each external collaborator (text generation, speech synthesis, blob
//! storage) is injected as a capability handle; clients are constructed once
//! per process by the hosting layer and reused across requests.

mod speech_port;
mod storage_port;
mod textgen_port;

pub use speech_port::{SpeechRequest, SpeechSynthesisError, SpeechSynthesisPort, SynthesizedSpeech};
pub use storage_port::{ArtifactStoreError, ArtifactStorePort};
pub use textgen_port::{
    TextGenerationError, TextGenerationPort, TextGenerationRequest, TextGenerationResponse,
};
