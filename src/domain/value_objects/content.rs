//! Content analysis shapes - output of the ContentAnalyzer stage

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Editorial complexity of the source material.
///
/// The wire format keeps the pt-BR spellings the pipeline has always emitted;
/// deserialization also accepts the English forms. Unknown values degrade to
/// `Medium` rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplexityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "baixo",
            ComplexityLevel::Medium => "médio",
            ComplexityLevel::High => "alto",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComplexityLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComplexityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_lowercase().as_str() {
            "baixo" | "low" => ComplexityLevel::Low,
            "alto" | "high" => ComplexityLevel::High,
            // "médio", "medio", "medium" and anything unexpected
            _ => ComplexityLevel::Medium,
        })
    }
}

/// Structured outline extracted from the source text.
///
/// All fields are optional on the wire; consumers substitute their own
/// documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_potential: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_level: Option<ComplexityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub analogy_opportunities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_accuracy: Option<String>,
    /// Present only when the model response could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
}

impl ContentAnalysis {
    /// Documented defaults substituted when the model response is unusable.
    pub fn fallback(raw: String) -> Self {
        Self {
            hook_potential: Some(7.5),
            complexity_level: Some(ComplexityLevel::Medium),
            target_audience: Some("público geral interessado em ciência".to_string()),
            key_concepts: vec!["conceito_principal".to_string()],
            analogy_opportunities: vec!["analogia_visual_1".to_string()],
            emotional_tone: Some("otimista_cauteloso".to_string()),
            scientific_accuracy: Some("alta".to_string()),
            raw_analysis: Some(raw),
        }
    }
}

/// The full ContentAnalyzer stage payload as downstream stages receive it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAnalysisPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub analysis: ContentAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_validation: Option<QualityValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
}

/// Deterministic production-readiness checks over the raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityValidation {
    pub quality_score: f64,
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,
    pub recommendation: String,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_accepts_both_languages() {
        let high: ComplexityLevel = serde_json::from_str("\"alto\"").unwrap();
        assert_eq!(high, ComplexityLevel::High);
        let high_en: ComplexityLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(high_en, ComplexityLevel::High);
        let low: ComplexityLevel = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(low, ComplexityLevel::Low);
    }

    #[test]
    fn unknown_complexity_degrades_to_medium() {
        let level: ComplexityLevel = serde_json::from_str("\"???\"").unwrap();
        assert_eq!(level, ComplexityLevel::Medium);
    }

    #[test]
    fn missing_analysis_fields_deserialize_to_defaults() {
        let payload: ContentAnalysisPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.analysis.hook_potential.is_none());
        assert!(payload.analysis.key_concepts.is_empty());
    }

    #[test]
    fn fallback_carries_raw_text() {
        let fallback = ContentAnalysis::fallback("garbled".to_string());
        assert_eq!(fallback.hook_potential, Some(7.5));
        assert_eq!(fallback.raw_analysis.as_deref(), Some("garbled"));
    }
}
