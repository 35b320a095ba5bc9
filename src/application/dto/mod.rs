//! Request DTOs for the six worker endpoints
//!
//! Each worker requires exactly one non-empty top-level field (or set of
//! fields); those are modeled as `Option` so their absence can fail fast with
//! a client error. Everything nested below them is optional-with-defaults:
//! deserialization never rejects a request for a missing nested field.

use serde::Deserialize;

use crate::domain::value_objects::{
    AudioSynthesisPayload, ContentAnalysisPayload, EmotionalToneHints, Script,
    VisualDesignPayload,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeContentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateScriptRequest {
    #[serde(default)]
    pub content_analysis: Option<ContentAnalysisPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesignVisualsRequest {
    #[serde(default)]
    pub script: Option<Script>,
    #[serde(default)]
    pub content_analysis: Option<ContentAnalysisPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynthesizeAudioRequest {
    #[serde(default)]
    pub script: Option<Script>,
    #[serde(default)]
    pub emotional_tone: EmotionalToneHints,
}

/// Wrapper matching the VisualDesigner worker's full response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualAssets {
    #[serde(default)]
    pub visual_design: VisualDesignPayload,
}

/// Wrapper matching the AudioSynthesizer worker's full response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioAssets {
    #[serde(default)]
    pub audio_synthesis: AudioSynthesisPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessQualityRequest {
    #[serde(default)]
    pub visual_assets: Option<VisualAssets>,
    #[serde(default)]
    pub audio_assets: Option<AudioAssets>,
    #[serde(default)]
    pub script: Option<Script>,
    #[serde(default)]
    pub content_analysis: Option<ContentAnalysisPayload>,
}

/// Per-metric targets the pipeline run is compared against.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceTargets {
    #[serde(default = "PerformanceTargets::default_processing_time")]
    pub processing_time: f64,
    #[serde(default = "PerformanceTargets::default_cost")]
    pub cost: f64,
    #[serde(default = "PerformanceTargets::default_quality_score")]
    pub quality_score: f64,
}

impl PerformanceTargets {
    fn default_processing_time() -> f64 {
        480.0
    }

    fn default_cost() -> f64 {
        2.50
    }

    fn default_quality_score() -> f64 {
        9.0
    }
}

impl Default for PerformanceTargets {
    fn default() -> Self {
        Self {
            processing_time: Self::default_processing_time(),
            cost: Self::default_cost(),
            quality_score: Self::default_quality_score(),
        }
    }
}

/// The full processing trace of one pipeline run. Only the fields the
/// analyzer reads are typed; the trace may carry more.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessingTrace {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub content_analysis: Option<ContentAnalyzerResponse>,
    #[serde(default)]
    pub quality_assurance: Option<QualityTraceEntry>,
}

/// Slice of the ContentAnalyzer response the PerformanceAnalyzer reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentAnalyzerResponse {
    #[serde(default)]
    pub structure_analysis: Option<StructureAnalysisTrace>,
    #[serde(default)]
    pub quality_validation: Option<QualityValidationTrace>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructureAnalysisTrace {
    #[serde(default)]
    pub analysis: Option<AnalysisTrace>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisTrace {
    #[serde(default)]
    pub hook_potential: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityValidationTrace {
    #[serde(default)]
    pub quality_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityTraceEntry {
    #[serde(default)]
    pub final_quality_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzePerformanceRequest {
    #[serde(default)]
    pub final_video: Option<serde_json::Value>,
    #[serde(default)]
    pub processing_metrics: Option<ProcessingTrace>,
    #[serde(default)]
    pub targets: Option<PerformanceTargets>,
}
