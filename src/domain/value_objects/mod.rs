//! Value objects - the data shapes exchanged between pipeline stages
//!
//! Every type here is a plain record passed by value. Downstream stages must
//! treat upstream fields as optional with documented defaults: a missing
//! nested field never aborts a request, it degrades to the default.

mod audio;
mod content;
mod model_output;
mod performance;
mod quality;
mod script;
mod visual;

pub use audio::{
    AudioArtifact, AudioMetrics, AudioQualityEstimate, AudioSegment, AudioSegments, AudioTimeline,
    AudioSynthesisPayload, BackgroundAudio, ContentAudioQuality, DynamicVolumePlan, EffectCue,
    EmotionalToneHints, FinalAudio, IntonationPattern, IntonationPatterns, MixingParameters,
    MusicPlan, MusicPlans, SoundEffects, SyncMarker, SyncPoint, VoiceProfile, VoiceProfiles,
    HOOK_WORDS_PER_SECOND, SECTION_WORDS_PER_SECOND,
};
pub use content::{ComplexityLevel, ContentAnalysis, ContentAnalysisPayload, QualityValidation};
pub use model_output::ModelOutput;
pub use performance::{
    factor_benchmark, prediction_confidence, success_probability, CostPerformance, FactorAnalysis,
    PredictedMetrics, ProcessingAnalysis, QualityPerformance, SuccessFactor, SuccessTier,
    TimingPerformance, CONFIDENCE_CAP, MANUAL_PRODUCTION_COST, MANUAL_PRODUCTION_SECONDS,
};
pub use quality::{
    final_quality_score, CategoryAssessment, ComplianceVerification, FinalVideo, GateDecision,
    QualityAssessments, QualityCategory, Recommendation, VideoComponents, VideoExportSettings,
};
pub use script::{Script, ScriptMetadata, ScriptTemplates, SectionTones};
pub use visual::{
    AnimationPlan, AnimationPlans, BackgroundCharacters, BackgroundPlan, Backgrounds,
    CharacterDesign, Characters, ColorPalette, ComplianceChecks, ComplianceReport, ConceptMascot,
    ConceptVisual, HookType, HookVisualPlan, NarratorAvatar, SceneComposition, StyleGuide,
    Transition, VisualDesignPayload, VisualElements,
};
