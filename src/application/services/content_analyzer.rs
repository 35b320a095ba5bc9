//! ContentAnalyzer - scores raw text for production readiness
//!
//! Two independent evaluations: a model-backed structure analysis (hook
//! potential, complexity, key concepts) and a deterministic quality
//! validation over the raw text. The structure analysis parses the model's
//! response as JSON-if-possible; a garbled response degrades to the
//! documented fallback analysis instead of failing the request.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::application::ports::outbound::{TextGenerationPort, TextGenerationRequest};
use crate::application::services::{extract_json_object, prompts};
use crate::domain::value_objects::{ContentAnalysis, ModelOutput, QualityValidation};

#[derive(Debug, thiserror::Error)]
pub enum ContentAnalysisError {
    #[error("text generation failed: {0}")]
    TextGeneration(String),
}

/// ContentAnalyzer stage payload.
#[derive(Debug, Clone, Serialize)]
pub struct StructureAnalysis {
    pub status: &'static str,
    pub analysis: ModelOutput<ContentAnalysis>,
    pub timestamp: String,
    pub methodology: &'static str,
}

pub struct ContentAnalyzerService<L: TextGenerationPort> {
    textgen: L,
}

impl<L: TextGenerationPort> ContentAnalyzerService<L> {
    pub fn new(textgen: L) -> Self {
        Self { textgen }
    }

    /// Analyze the structure of the source text with the text model.
    pub async fn analyze_structure(
        &self,
        content: &str,
    ) -> Result<StructureAnalysis, ContentAnalysisError> {
        let request = TextGenerationRequest::new(prompts::build_analysis_prompt(content))
            .with_temperature(0.2)
            .with_max_output_tokens(1024);

        let response = self
            .textgen
            .generate(request)
            .await
            .map_err(|e| ContentAnalysisError::TextGeneration(e.to_string()))?;

        let analysis = Self::parse_analysis(&response.text);
        if analysis.is_fallback() {
            tracing::warn!("content analysis response was not valid JSON, using fallback");
        }

        Ok(StructureAnalysis {
            status: "success",
            analysis,
            timestamp: Utc::now().to_rfc3339(),
            methodology: "kurzgesagt_quantified",
        })
    }

    fn parse_analysis(response_text: &str) -> ModelOutput<ContentAnalysis> {
        if let Some(json) = extract_json_object(response_text) {
            if let Ok(analysis) = serde_json::from_str::<ContentAnalysis>(json) {
                return ModelOutput::Parsed(analysis);
            }
        }
        ModelOutput::Fallback {
            default: ContentAnalysis::fallback(response_text.to_string()),
            raw: response_text.to_string(),
        }
    }

    /// Deterministic production-readiness checks. Each passed check is worth
    /// 2.5 points; 7.0 is the approval bar.
    pub fn validate_quality(&self, content: &str) -> QualityValidation {
        let word_count = content.split_whitespace().count();
        let sentence_count = content.split('.').count();
        let lower = content.to_lowercase();
        let scientific_terms = ["pesquisa", "estudo", "científico", "evidência", "dados"];

        let mut checks = BTreeMap::new();
        checks.insert("length_appropriate".to_string(), word_count >= 100);
        checks.insert(
            "scientific_terms_present".to_string(),
            scientific_terms.iter().any(|term| lower.contains(term)),
        );
        checks.insert("narrative_potential".to_string(), sentence_count >= 5);
        checks.insert("complexity_manageable".to_string(), word_count <= 2000);

        let passed = checks.values().filter(|c| **c).count();
        let quality_score = passed as f64 / checks.len() as f64 * 10.0;

        QualityValidation {
            quality_score,
            checks,
            recommendation: if quality_score >= 7.0 {
                "approved".to_string()
            } else {
                "needs_revision".to_string()
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{TextGenerationError, TextGenerationResponse};
    use crate::domain::value_objects::ComplexityLevel;
    use async_trait::async_trait;

    struct StubTextGen {
        reply: String,
    }

    #[async_trait]
    impl TextGenerationPort for StubTextGen {
        async fn generate(
            &self,
            _request: TextGenerationRequest,
        ) -> Result<TextGenerationResponse, TextGenerationError> {
            Ok(TextGenerationResponse {
                text: self.reply.clone(),
            })
        }
    }

    fn scientific_text(words: usize) -> String {
        let sentence = "A pesquisa mostra dados com evidência científica clara. ";
        let mut text = String::new();
        while text.split_whitespace().count() < words {
            text.push_str(sentence);
        }
        text
    }

    #[tokio::test]
    async fn parses_model_json_into_analysis() {
        let service = ContentAnalyzerService::new(StubTextGen {
            reply: r#"Segue a análise: {"hook_potential": 9.0, "complexity_level": "alto",
                "key_concepts": ["buracos negros"]}"#
                .to_string(),
        });
        let result = service.analyze_structure("conteúdo").await.unwrap();
        assert_eq!(result.status, "success");
        assert!(!result.analysis.is_fallback());
        let analysis = result.analysis.value();
        assert_eq!(analysis.hook_potential, Some(9.0));
        assert_eq!(analysis.complexity_level, Some(ComplexityLevel::High));
    }

    #[tokio::test]
    async fn garbled_model_output_degrades_to_fallback() {
        let service = ContentAnalyzerService::new(StubTextGen {
            reply: "desculpe, não consigo".to_string(),
        });
        let result = service.analyze_structure("conteúdo").await.unwrap();
        assert!(result.analysis.is_fallback());
        assert_eq!(result.analysis.value().hook_potential, Some(7.5));
        assert_eq!(
            result.analysis.value().raw_analysis.as_deref(),
            Some("desculpe, não consigo")
        );
    }

    #[test]
    fn quality_validation_approves_well_formed_text() {
        let service = ContentAnalyzerService::new(StubTextGen {
            reply: String::new(),
        });
        let validation = service.validate_quality(&scientific_text(150));
        assert_eq!(validation.quality_score, 10.0);
        assert_eq!(validation.recommendation, "approved");
    }

    #[test]
    fn quality_validation_flags_short_text() {
        let service = ContentAnalyzerService::new(StubTextGen {
            reply: String::new(),
        });
        let validation = service.validate_quality("Curto demais.");
        assert!(validation.quality_score < 7.0);
        assert_eq!(validation.recommendation, "needs_revision");
        assert_eq!(validation.checks["length_appropriate"], false);
    }
}
