//! Shared application state

use crate::application::services::{
    AudioSynthesizerService, ContentAnalyzerService, PerformanceAnalyzerService,
    QualityAssurerService, ScriptGeneratorService, VisualDesignerService,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::speech::SpeechClient;
use crate::infrastructure::storage::BlobStoreClient;
use crate::infrastructure::textgen::TextGenClient;

/// Shared application state: one service per worker endpoint, each holding
/// the clients it talks through. Clients are built once and cloned into the
/// services; `reqwest::Client` shares its connection pool across clones.
pub struct AppState {
    pub config: AppConfig,
    pub content_analyzer: ContentAnalyzerService<TextGenClient>,
    pub script_generator: ScriptGeneratorService<TextGenClient>,
    pub visual_designer: VisualDesignerService,
    pub audio_synthesizer: AudioSynthesizerService<SpeechClient, BlobStoreClient>,
    pub quality_assurer: QualityAssurerService<TextGenClient>,
    pub performance_analyzer: PerformanceAnalyzerService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let textgen = TextGenClient::new(&config.textgen_base_url, &config.textgen_model);
        let tts = SpeechClient::new(&config.tts_base_url);
        let storage = config
            .storage_base_url
            .as_deref()
            .map(|url| BlobStoreClient::new(url, &config.storage_bucket));

        Self {
            content_analyzer: ContentAnalyzerService::new(textgen.clone()),
            script_generator: ScriptGeneratorService::new(textgen.clone()),
            visual_designer: VisualDesignerService::new(),
            audio_synthesizer: AudioSynthesizerService::new(tts, storage),
            quality_assurer: QualityAssurerService::new(textgen, config.target_quality),
            performance_analyzer: PerformanceAnalyzerService::new(),
            config,
        }
    }
}
