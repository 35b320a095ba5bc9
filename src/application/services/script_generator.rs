//! ScriptGenerator - turns a content analysis into a four-section script
//!
//! The model is asked for a section-marked plain-text response; parsing walks
//! the lines and buckets them under the last seen marker. Metadata (duration
//! estimate, attention peaks, visual suggestions, section tones) is derived
//! deterministically from the response text.

use chrono::Utc;
use serde::Serialize;

use crate::application::ports::outbound::{TextGenerationPort, TextGenerationRequest};
use crate::application::services::prompts;
use crate::domain::value_objects::{
    ContentAnalysis, Script, ScriptMetadata, ScriptTemplates, SectionTones,
};

/// Narration pace used for duration estimates, in words per minute.
const NARRATION_WORDS_PER_MINUTE: f64 = 150.0;

const ATTENTION_MARKERS: [&str; 5] =
    ["surpreendente", "incrível", "imagine", "mas espere", "contudo"];

const VISUAL_CUES: [&str; 5] = ["visualize", "imagine", "picture", "veja", "observe"];

#[derive(Debug, thiserror::Error)]
pub enum ScriptGenerationError {
    #[error("text generation failed: {0}")]
    TextGeneration(String),
}

/// ScriptGenerator stage payload.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptGeneration {
    pub status: &'static str,
    pub script: Script,
    pub methodology: &'static str,
    pub templates_used: ScriptTemplates,
    pub timestamp: String,
}

pub struct ScriptGeneratorService<L: TextGenerationPort> {
    textgen: L,
}

impl<L: TextGenerationPort> ScriptGeneratorService<L> {
    pub fn new(textgen: L) -> Self {
        Self { textgen }
    }

    /// Generate the four-section script from an upstream content analysis.
    /// Missing analysis fields fall back to their documented defaults, so a
    /// sparse analysis still produces a script.
    pub async fn generate(
        &self,
        analysis: &ContentAnalysis,
    ) -> Result<ScriptGeneration, ScriptGenerationError> {
        let request = TextGenerationRequest::new(prompts::build_script_prompt(analysis))
            .with_temperature(0.3)
            .with_max_output_tokens(2048);

        let response = self
            .textgen
            .generate(request)
            .await
            .map_err(|e| ScriptGenerationError::TextGeneration(e.to_string()))?;

        Ok(ScriptGeneration {
            status: "success",
            script: parse_script_response(&response.text),
            methodology: "kurzgesagt_quantified",
            templates_used: ScriptTemplates::adaptive(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

/// Bucket response lines into sections by their `[MARKER ...]` headings.
/// Lines before the first marker and marker lines themselves are dropped.
fn parse_script_response(response_text: &str) -> Script {
    enum Section {
        Hook,
        Context,
        Development,
        Synthesis,
    }

    let mut script = Script::default();
    let mut current: Option<Section> = None;

    for raw_line in response_text.lines() {
        let line = raw_line.trim();
        if line.contains("[HOOK INICIAL") {
            current = Some(Section::Hook);
        } else if line.contains("[CONTEXTUALIZAÇÃO") {
            current = Some(Section::Context);
        } else if line.contains("[DESENVOLVIMENTO") {
            current = Some(Section::Development);
        } else if line.contains("[SÍNTESE FINAL") {
            current = Some(Section::Synthesis);
        } else if !line.is_empty() && !line.starts_with('[') {
            let target = match current {
                Some(Section::Hook) => &mut script.hook_inicial,
                Some(Section::Context) => &mut script.contextualizacao,
                Some(Section::Development) => &mut script.desenvolvimento,
                Some(Section::Synthesis) => &mut script.sintese_final,
                None => continue,
            };
            target.push_str(line);
            target.push('\n');
        }
    }

    script.metadata = ScriptMetadata {
        estimated_duration: estimate_duration(response_text),
        attention_peaks: identify_attention_peaks(response_text),
        visual_suggestions: extract_visual_suggestions(response_text),
        emotional_tone: SectionTones::default(),
    };

    script
}

fn estimate_duration(text: &str) -> String {
    let word_count = text.split_whitespace().count();
    let minutes = word_count as f64 / NARRATION_WORDS_PER_MINUTE;
    format!("{minutes:.1} minutos")
}

fn identify_attention_peaks(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    ATTENTION_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .map(|marker| format!("Pico de atenção: {marker}"))
        .collect()
}

fn extract_visual_suggestions(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    VISUAL_CUES
        .iter()
        .filter(|cue| lower.contains(*cue))
        .map(|cue| format!("Elemento visual para: {cue}"))
        .collect()
}
