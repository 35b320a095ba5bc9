//! Quality assessment shapes and the gate scoring rule

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The six assessment categories, in evaluation (and recommendation) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityCategory {
    Content,
    Narrative,
    Visual,
    Audio,
    Educational,
    Philosophical,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 6] = [
        QualityCategory::Content,
        QualityCategory::Narrative,
        QualityCategory::Visual,
        QualityCategory::Audio,
        QualityCategory::Educational,
        QualityCategory::Philosophical,
    ];

    /// Fixed category weights. Invariant: they sum to exactly 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            QualityCategory::Content => 0.25,
            QualityCategory::Narrative => 0.20,
            QualityCategory::Visual => 0.20,
            QualityCategory::Audio => 0.15,
            QualityCategory::Educational => 0.15,
            QualityCategory::Philosophical => 0.05,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            QualityCategory::Content => "content_assessment",
            QualityCategory::Narrative => "narrative_assessment",
            QualityCategory::Visual => "visual_assessment",
            QualityCategory::Audio => "audio_assessment",
            QualityCategory::Educational => "educational_assessment",
            QualityCategory::Philosophical => "philosophical_assessment",
        }
    }
}

/// One category's evaluation, always numeric: an evaluation that fails
/// upstream defaults to 8.0 rather than aborting the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAssessment {
    pub overall_score: f64,
    #[serde(default)]
    pub detailed_scores: BTreeMap<String, f64>,
    /// Whether the score came from the model (content category only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_assessment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_used: Option<bool>,
}

impl CategoryAssessment {
    pub fn from_detailed(detailed: BTreeMap<String, f64>) -> Self {
        let overall_score = if detailed.is_empty() {
            0.0
        } else {
            detailed.values().sum::<f64>() / detailed.len() as f64
        };
        Self {
            overall_score,
            detailed_scores: detailed,
            ai_assessment: None,
            fallback_used: None,
        }
    }

    /// Substitute used whenever a category evaluation fails.
    pub fn default_fallback() -> Self {
        Self {
            overall_score: 8.0,
            detailed_scores: BTreeMap::new(),
            ai_assessment: Some(false),
            fallback_used: Some(true),
        }
    }
}

impl Default for CategoryAssessment {
    fn default() -> Self {
        Self::default_fallback()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityAssessments {
    #[serde(default)]
    pub content_assessment: CategoryAssessment,
    #[serde(default)]
    pub narrative_assessment: CategoryAssessment,
    #[serde(default)]
    pub visual_assessment: CategoryAssessment,
    #[serde(default)]
    pub audio_assessment: CategoryAssessment,
    #[serde(default)]
    pub educational_assessment: CategoryAssessment,
    #[serde(default)]
    pub philosophical_assessment: CategoryAssessment,
}

impl QualityAssessments {
    pub fn get(&self, category: QualityCategory) -> &CategoryAssessment {
        match category {
            QualityCategory::Content => &self.content_assessment,
            QualityCategory::Narrative => &self.narrative_assessment,
            QualityCategory::Visual => &self.visual_assessment,
            QualityCategory::Audio => &self.audio_assessment,
            QualityCategory::Educational => &self.educational_assessment,
            QualityCategory::Philosophical => &self.philosophical_assessment,
        }
    }
}

/// Weighted final score over all six categories, rounded to two decimals.
pub fn final_quality_score(assessments: &QualityAssessments) -> f64 {
    let weighted: f64 = QualityCategory::ALL
        .iter()
        .map(|category| assessments.get(*category).overall_score * category.weight())
        .sum();
    (weighted * 100.0).round() / 100.0
}

/// Terminal gate decision for one pipeline run. A `NeedsRevision` outcome is
/// surfaced to the caller, never silently retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Passed,
    NeedsRevision,
}

impl GateDecision {
    pub fn decide(final_score: f64, target_quality: f64) -> Self {
        if final_score >= target_quality {
            GateDecision::Passed
        } else {
            GateDecision::NeedsRevision
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub current_score: f64,
    pub target_score: f64,
    pub priority: String,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoExportSettings {
    pub codec: String,
    pub bitrate: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoComponents {
    pub visual_track: serde_json::Value,
    pub audio_track: serde_json::Value,
    pub subtitle_track: serde_json::Value,
    pub metadata: serde_json::Value,
}

/// Descriptor of the assembled video artifact, synthesized only when the
/// gate passes. Metadata only: rendering is a downstream collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalVideo {
    pub video_file: String,
    pub duration_seconds: f64,
    pub resolution: String,
    pub framerate: String,
    pub quality: String,
    pub components: VideoComponents,
    pub export_settings: VideoExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceVerification {
    pub overall_compliance_percentage: f64,
    pub individual_checks: BTreeMap<String, bool>,
    pub kurzgesagt_certified: bool,
    pub certification_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: f64) -> QualityAssessments {
        let one = |s: f64| CategoryAssessment {
            overall_score: s,
            detailed_scores: BTreeMap::new(),
            ai_assessment: None,
            fallback_used: None,
        };
        QualityAssessments {
            content_assessment: one(score),
            narrative_assessment: one(score),
            visual_assessment: one(score),
            audio_assessment: one(score),
            educational_assessment: one(score),
            philosophical_assessment: one(score),
        }
    }

    #[test]
    fn category_weights_sum_to_one() {
        let total: f64 = QualityCategory::ALL.iter().map(|c| c.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_scores_pass_through_the_weighting() {
        let assessments = uniform(9.0);
        assert_eq!(final_quality_score(&assessments), 9.0);
        assert_eq!(
            GateDecision::decide(final_quality_score(&assessments), 9.0),
            GateDecision::Passed
        );
    }

    #[test]
    fn weak_content_category_drags_the_gate_below_target() {
        let mut assessments = uniform(9.0);
        assessments.content_assessment.overall_score = 5.0;
        let score = final_quality_score(&assessments);
        assert_eq!(score, 8.0);
        assert_eq!(GateDecision::decide(score, 9.0), GateDecision::NeedsRevision);
    }

    #[test]
    fn final_score_is_bounded_for_valid_inputs() {
        assert_eq!(final_quality_score(&uniform(0.0)), 0.0);
        assert_eq!(final_quality_score(&uniform(10.0)), 10.0);
    }

    #[test]
    fn raising_one_category_never_lowers_the_final_score() {
        for category in QualityCategory::ALL {
            let mut low = uniform(6.0);
            let base = final_quality_score(&low);
            match category {
                QualityCategory::Content => low.content_assessment.overall_score = 9.5,
                QualityCategory::Narrative => low.narrative_assessment.overall_score = 9.5,
                QualityCategory::Visual => low.visual_assessment.overall_score = 9.5,
                QualityCategory::Audio => low.audio_assessment.overall_score = 9.5,
                QualityCategory::Educational => low.educational_assessment.overall_score = 9.5,
                QualityCategory::Philosophical => {
                    low.philosophical_assessment.overall_score = 9.5
                }
            }
            assert!(final_quality_score(&low) >= base);
        }
    }

    #[test]
    fn failed_evaluation_defaults_to_eight() {
        let fallback = CategoryAssessment::default_fallback();
        assert_eq!(fallback.overall_score, 8.0);
        assert_eq!(fallback.fallback_used, Some(true));
    }
}
