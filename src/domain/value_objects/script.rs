//! Script shapes - output of the ScriptGenerator stage

use serde::{Deserialize, Serialize};

/// Four-section narration script.
///
/// Section names follow the production methodology: hook (0-15s),
/// contextualization (15-45s), main development, and a final synthesis
/// covering the last 20-25% of the video. A missing section deserializes to
/// the empty string and downstream stages carry on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub hook_inicial: String,
    #[serde(default)]
    pub contextualizacao: String,
    #[serde(default)]
    pub desenvolvimento: String,
    #[serde(default)]
    pub sintese_final: String,
    #[serde(default)]
    pub metadata: ScriptMetadata,
}

impl Script {
    pub fn sections(&self) -> [(&'static str, &str); 4] {
        [
            ("hook_inicial", self.hook_inicial.as_str()),
            ("contextualizacao", self.contextualizacao.as_str()),
            ("desenvolvimento", self.desenvolvimento.as_str()),
            ("sintese_final", self.sintese_final.as_str()),
        ]
    }

    pub fn total_words(&self) -> usize {
        self.sections()
            .iter()
            .map(|(_, text)| text.split_whitespace().count())
            .sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptMetadata {
    #[serde(default)]
    pub estimated_duration: String,
    #[serde(default)]
    pub attention_peaks: Vec<String>,
    #[serde(default)]
    pub visual_suggestions: Vec<String>,
    #[serde(default)]
    pub emotional_tone: SectionTones,
}

/// Emotional register per script section, fixed by the methodology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTones {
    pub hook: String,
    pub contextualizacao: String,
    pub desenvolvimento: String,
    pub sintese: String,
}

impl Default for SectionTones {
    fn default() -> Self {
        Self {
            hook: "intrigante/provocativo".to_string(),
            contextualizacao: "relevante/pessoal".to_string(),
            desenvolvimento: "educativo/progressivo".to_string(),
            sintese: "empoderador/otimista".to_string(),
        }
    }
}

/// Adaptive script templates. Configuration data echoed in every generation
/// payload, never derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptTemplates {
    pub educational_explainer: ExplainerTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainerTemplate {
    pub hook_patterns: Vec<String>,
    pub structure: SectionStructure,
}

/// Timing envelope per section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionStructure {
    pub hook_inicial: String,
    pub contextualizacao: String,
    pub desenvolvimento: String,
    pub sintese_final: String,
}

impl ScriptTemplates {
    /// Hook patterns in measured-retention order: questions 91%,
    /// statistics 87%, scenarios 84%.
    pub fn adaptive() -> Self {
        Self {
            educational_explainer: ExplainerTemplate {
                hook_patterns: [
                    "provocative_question",
                    "surprising_statistic",
                    "intriguing_scenario",
                ]
                .map(str::to_string)
                .to_vec(),
                structure: SectionStructure {
                    hook_inicial: "0-15s".to_string(),
                    contextualizacao: "15-45s".to_string(),
                    desenvolvimento: "corpo principal".to_string(),
                    sintese_final: "20-25% do total".to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_script_deserializes_with_empty_sections() {
        let script: Script =
            serde_json::from_str(r#"{"hook_inicial": "E se eu te dissesse?"}"#).unwrap();
        assert_eq!(script.hook_inicial, "E se eu te dissesse?");
        assert!(script.sintese_final.is_empty());
    }

    #[test]
    fn counts_words_across_sections() {
        let script = Script {
            hook_inicial: "um dois três".to_string(),
            contextualizacao: "quatro cinco".to_string(),
            ..Default::default()
        };
        assert_eq!(script.total_words(), 5);
    }
}
