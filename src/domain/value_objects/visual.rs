//! Visual design shapes - output of the VisualDesigner stage

use serde::{Deserialize, Serialize};

/// Hook classification driving the opening visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    ProvocativeQuestion,
    SurprisingStatistic,
    IntriguingScenario,
}

impl HookType {
    /// Question marks beat digits beat everything else, matching the
    /// retention ranking of the three hook patterns.
    pub fn classify(hook_text: &str) -> Self {
        if hook_text.contains('?') {
            HookType::ProvocativeQuestion
        } else if hook_text.chars().any(|c| c.is_ascii_digit()) {
            HookType::SurprisingStatistic
        } else {
            HookType::IntriguingScenario
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookVisualPlan {
    pub opening_scene: String,
    pub focal_element: String,
    pub color_scheme: String,
    pub animation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptVisual {
    pub concept: String,
    pub visual_metaphor: String,
    pub illustration_style: String,
    pub color_palette: Vec<String>,
    pub animation_type: String,
    pub complexity_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorAvatar {
    pub style: String,
    pub personality: String,
    pub color_scheme: Vec<String>,
    pub emotions: Vec<String>,
    pub size_variations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptMascot {
    pub represents: String,
    pub personality: String,
    pub visual_style: String,
    pub color: String,
    pub animations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundCharacters {
    pub scientists: String,
    pub observers: String,
    pub scale_references: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Characters {
    pub narrator_avatar: NarratorAvatar,
    pub concept_mascots: Vec<ConceptMascot>,
    pub background_characters: BackgroundCharacters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundPlan {
    pub style: String,
    pub colors: Vec<String>,
    pub elements: Vec<String>,
    pub mood: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backgrounds {
    pub hook_background: BackgroundPlan,
    pub explanation_backgrounds: BackgroundPlan,
    pub conclusion_background: BackgroundPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationPlan {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
    pub key_frames: Vec<String>,
    pub pacing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationPlans {
    pub hook_animation: AnimationPlan,
    pub concept_animations: AnimationPlan,
    pub transition_animations: AnimationPlan,
    pub conclusion_animation: AnimationPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub visual: String,
    pub duration: String,
}

/// The complete visual asset plan for one video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_visuals: Option<HookVisualPlan>,
    #[serde(default)]
    pub concept_illustrations: Vec<ConceptVisual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Characters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backgrounds: Option<Backgrounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<AnimationPlans>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Fixed brand palette. Configuration data, not logic: the values are
/// enumerated exactly as documented and never derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub backgrounds: Vec<String>,
    pub accent: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDesign {
    pub style: String,
    pub characteristics: Vec<String>,
    pub emotion_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneComposition {
    pub space_usage: String,
    pub scale_contrast: String,
    pub visual_metaphors: String,
    pub attention_flow: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleGuide {
    pub color_palette: ColorPalette,
    pub character_design: CharacterDesign,
    pub scene_composition: SceneComposition,
}

impl StyleGuide {
    /// The quantified Kurzgesagt house style, loaded once at process start.
    pub fn kurzgesagt() -> Self {
        fn strings(values: &[&str]) -> Vec<String> {
            values.iter().map(|s| s.to_string()).collect()
        }

        Self {
            color_palette: ColorPalette {
                primary: strings(&["#FF6B35", "#F7931E", "#FFD23F"]),
                secondary: strings(&["#06FFA5", "#3A86FF", "#8338EC"]),
                backgrounds: strings(&["#0A0E27", "#1A1D3A", "#2C3E50"]),
                accent: strings(&["#FFFFFF", "#F8F9FA", "#ECF0F1"]),
            },
            character_design: CharacterDesign {
                style: "flat_geometric".to_string(),
                characteristics: strings(&[
                    "simple shapes",
                    "bold colors",
                    "expressive eyes",
                    "minimal details",
                ]),
                emotion_factors: strings(&["curiosity", "wonder", "intelligence", "optimism"]),
            },
            scene_composition: SceneComposition {
                space_usage: "cosmic_perspective".to_string(),
                scale_contrast: "micro_to_macro".to_string(),
                visual_metaphors: "scientific_concepts".to_string(),
                attention_flow: "guided_visual_hierarchy".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceChecks {
    #[serde(default)]
    pub color_palette_adherence: bool,
    #[serde(default)]
    pub character_style_consistency: bool,
    #[serde(default)]
    pub cosmic_perspective_present: bool,
    #[serde(default)]
    pub scientific_accuracy_visual: bool,
    #[serde(default)]
    pub optimistic_tone_visual: bool,
}

impl ComplianceChecks {
    pub fn passed(&self) -> usize {
        [
            self.color_palette_adherence,
            self.character_style_consistency,
            self.cosmic_perspective_present,
            self.scientific_accuracy_visual,
            self.optimistic_tone_visual,
        ]
        .iter()
        .filter(|c| **c)
        .count()
    }

    pub const TOTAL: usize = 5;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Absent in sparse upstream payloads; consumers substitute the
    /// 80-point baseline rather than reading a zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_score: Option<f64>,
    #[serde(default)]
    pub checks: ComplianceChecks,
    #[serde(default)]
    pub style_guide_followed: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The full VisualDesigner stage payload as the QualityAssurer receives it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualDesignPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub visual_elements: VisualElements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_guide: Option<StyleGuide>,
    #[serde(default)]
    pub kurzgesagt_compliance: ComplianceReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
