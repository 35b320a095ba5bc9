//! Application services - one per pipeline worker

mod audio_synthesizer;
mod content_analyzer;
mod performance_analyzer;
pub mod prompts;
mod quality_assurer;
mod script_generator;
mod visual_designer;

pub use audio_synthesizer::{AudioSynthesis, AudioSynthesisError, AudioSynthesizerService};
pub use content_analyzer::{ContentAnalysisError, ContentAnalyzerService, StructureAnalysis};
pub use performance_analyzer::{PerformanceAnalysis, PerformanceAnalyzerService};
pub use quality_assurer::{QualityAssessment, QualityAssurerService};
pub use script_generator::{ScriptGeneration, ScriptGenerationError, ScriptGeneratorService};
pub use visual_designer::{VisualDesign, VisualDesignerService};

/// Extracts the outermost JSON object from free-form model text, if any.
/// Models tend to wrap JSON in prose or code fences; everything outside the
/// first `{` and the last `}` is discarded before parsing.
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nHope this helps.";
        assert_eq!(extract_json_object(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn rejects_text_without_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }
}
