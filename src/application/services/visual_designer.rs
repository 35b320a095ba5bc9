//! VisualDesigner - deterministic visual planning over script + analysis
//!
//! No external service is involved: every plan is derived from the script
//! text, the upstream analysis, and the fixed style guide. The compliance
//! report re-checks the produced plan against the style guide instead of
//! assuming conformity.

use chrono::Utc;
use serde::Serialize;

use crate::domain::value_objects::{
    AnimationPlan, AnimationPlans, BackgroundCharacters, BackgroundPlan, Backgrounds, Characters,
    ComplianceChecks, ComplianceReport, ConceptMascot, ConceptVisual, ContentAnalysis, HookType,
    HookVisualPlan, NarratorAvatar, Script, StyleGuide, Transition, VisualElements,
};

const MAX_CONCEPT_ILLUSTRATIONS: usize = 5;
const MAX_CONCEPT_MASCOTS: usize = 3;

/// VisualDesigner stage payload.
#[derive(Debug, Clone, Serialize)]
pub struct VisualDesign {
    pub status: &'static str,
    pub visual_elements: VisualElements,
    pub style_guide: StyleGuide,
    pub kurzgesagt_compliance: ComplianceReport,
    pub timestamp: String,
}

pub struct VisualDesignerService {
    style: StyleGuide,
}

impl Default for VisualDesignerService {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualDesignerService {
    pub fn new() -> Self {
        Self {
            style: StyleGuide::kurzgesagt(),
        }
    }

    /// Produce the complete visual asset plan for one video.
    pub fn design(&self, script: &Script, analysis: &ContentAnalysis) -> VisualDesign {
        let visual_elements = VisualElements {
            hook_visuals: Some(self.design_hook_visuals(&script.hook_inicial)),
            concept_illustrations: self.design_concept_visuals(analysis),
            characters: Some(self.design_characters(analysis)),
            backgrounds: Some(self.design_backgrounds()),
            animations: Some(self.plan_animations()),
            transitions: self.design_transitions(),
        };

        let compliance = self.validate_style(&visual_elements);

        VisualDesign {
            status: "success",
            visual_elements,
            style_guide: self.style.clone(),
            kurzgesagt_compliance: compliance,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn design_hook_visuals(&self, hook_text: &str) -> HookVisualPlan {
        match HookType::classify(hook_text) {
            HookType::ProvocativeQuestion => HookVisualPlan {
                opening_scene: "cosmic_zoom_in".to_string(),
                focal_element: "floating_question_mark_with_particles".to_string(),
                color_scheme: "high_contrast_attention_grabbing".to_string(),
                animation: "rapid_reveal_sequence".to_string(),
            },
            HookType::SurprisingStatistic => HookVisualPlan {
                opening_scene: "data_visualization_explosion".to_string(),
                focal_element: "giant_floating_numbers".to_string(),
                color_scheme: "bright_accent_colors".to_string(),
                animation: "counter_animation_buildup".to_string(),
            },
            HookType::IntriguingScenario => HookVisualPlan {
                opening_scene: "miniature_world_zoom".to_string(),
                focal_element: "detailed_environment".to_string(),
                color_scheme: "immersive_world_palette".to_string(),
                animation: "smooth_environment_reveal".to_string(),
            },
        }
    }

    fn design_concept_visuals(&self, analysis: &ContentAnalysis) -> Vec<ConceptVisual> {
        analysis
            .key_concepts
            .iter()
            .take(MAX_CONCEPT_ILLUSTRATIONS)
            .map(|concept| ConceptVisual {
                concept: concept.clone(),
                visual_metaphor: visual_metaphor(concept).to_string(),
                illustration_style: "kurzgesagt_scientific".to_string(),
                color_palette: self.concept_colors(concept),
                animation_type: animation_type(concept).to_string(),
                complexity_level: visual_complexity(concept).to_string(),
            })
            .collect()
    }

    fn design_characters(&self, analysis: &ContentAnalysis) -> Characters {
        Characters {
            narrator_avatar: NarratorAvatar {
                style: "friendly_geometric_figure".to_string(),
                personality: "curious_scientist".to_string(),
                color_scheme: self.style.color_palette.primary.clone(),
                emotions: ["curious", "excited", "thoughtful", "encouraging"]
                    .map(str::to_string)
                    .to_vec(),
                size_variations: ["normal", "tiny_for_scale", "giant_for_emphasis"]
                    .map(str::to_string)
                    .to_vec(),
            },
            concept_mascots: self.create_concept_mascots(analysis),
            background_characters: BackgroundCharacters {
                scientists: "tiny_working_figures".to_string(),
                observers: "silhouette_crowd".to_string(),
                scale_references: "human_figures_for_perspective".to_string(),
            },
        }
    }

    fn create_concept_mascots(&self, analysis: &ContentAnalysis) -> Vec<ConceptMascot> {
        let secondary = &self.style.color_palette.secondary;
        analysis
            .key_concepts
            .iter()
            .take(MAX_CONCEPT_MASCOTS)
            .enumerate()
            .map(|(i, concept)| ConceptMascot {
                represents: concept.clone(),
                personality: "helpful_guide".to_string(),
                visual_style: "cute_geometric".to_string(),
                color: secondary[i % secondary.len()].clone(),
                animations: ["pointing", "explaining", "celebrating"]
                    .map(str::to_string)
                    .to_vec(),
            })
            .collect()
    }

    fn design_backgrounds(&self) -> Backgrounds {
        Backgrounds {
            hook_background: BackgroundPlan {
                style: "cosmic_space".to_string(),
                colors: self.style.color_palette.backgrounds.clone(),
                elements: ["stars", "nebulas", "particles"].map(str::to_string).to_vec(),
                mood: "mysterious_intriguing".to_string(),
            },
            explanation_backgrounds: BackgroundPlan {
                style: "clean_laboratory".to_string(),
                colors: ["#F8F9FA", "#ECF0F1"].map(str::to_string).to_vec(),
                elements: ["geometric_patterns", "floating_elements"]
                    .map(str::to_string)
                    .to_vec(),
                mood: "scientific_clarity".to_string(),
            },
            conclusion_background: BackgroundPlan {
                style: "hopeful_horizon".to_string(),
                colors: self.style.color_palette.primary.clone(),
                elements: ["rising_sun", "expanding_light"].map(str::to_string).to_vec(),
                mood: "optimistic_empowering".to_string(),
            },
        }
    }

    fn plan_animations(&self) -> AnimationPlans {
        fn plan(kind: &str, duration: &str, key_frames: [&str; 3], pacing: &str) -> AnimationPlan {
            AnimationPlan {
                kind: kind.to_string(),
                duration: duration.to_string(),
                key_frames: key_frames.map(str::to_string).to_vec(),
                pacing: pacing.to_string(),
            }
        }

        AnimationPlans {
            hook_animation: plan(
                "attention_grabbing_entrance",
                "15_seconds",
                ["dramatic_zoom", "reveal_sequence", "particle_effects"],
                "fast_engaging",
            ),
            concept_animations: plan(
                "explanatory_sequences",
                "20_30_second_cycles",
                ["build_up", "revelation", "integration"],
                "progressive_understanding",
            ),
            transition_animations: plan(
                "smooth_connectors",
                "2_3_seconds",
                ["morphing", "flowing", "connecting"],
                "seamless_flow",
            ),
            conclusion_animation: plan(
                "empowering_finale",
                "final_25_percent",
                ["gathering", "synthesis", "expansion"],
                "building_to_climax",
            ),
        }
    }

    fn design_transitions(&self) -> Vec<Transition> {
        fn transition(from: &str, to: &str, kind: &str, visual: &str, duration: &str) -> Transition {
            Transition {
                from: from.to_string(),
                to: to.to_string(),
                kind: kind.to_string(),
                visual: visual.to_string(),
                duration: duration.to_string(),
            }
        }

        vec![
            transition(
                "hook",
                "contextualization",
                "zoom_refocus",
                "cosmic_to_personal_perspective",
                "2_seconds",
            ),
            transition(
                "contextualization",
                "development",
                "morphing_transformation",
                "concept_materialization",
                "3_seconds",
            ),
            transition(
                "development",
                "synthesis",
                "gathering_convergence",
                "elements_coming_together",
                "2_seconds",
            ),
        ]
    }

    /// Re-check the produced plan against the style guide.
    fn validate_style(&self, elements: &VisualElements) -> ComplianceReport {
        let palette: Vec<&String> = self
            .style
            .color_palette
            .primary
            .iter()
            .chain(&self.style.color_palette.secondary)
            .chain(&self.style.color_palette.backgrounds)
            .chain(&self.style.color_palette.accent)
            .collect();

        let checks = ComplianceChecks {
            color_palette_adherence: elements
                .concept_illustrations
                .iter()
                .all(|c| c.color_palette.iter().all(|color| palette.contains(&color))),
            character_style_consistency: elements
                .characters
                .as_ref()
                .is_some_and(|c| c.narrator_avatar.style == "friendly_geometric_figure"),
            cosmic_perspective_present: elements
                .backgrounds
                .as_ref()
                .is_some_and(|b| b.hook_background.style == "cosmic_space"),
            scientific_accuracy_visual: elements
                .concept_illustrations
                .iter()
                .all(|c| c.illustration_style == "kurzgesagt_scientific"),
            optimistic_tone_visual: elements
                .backgrounds
                .as_ref()
                .is_some_and(|b| b.conclusion_background.mood == "optimistic_empowering"),
        };

        let compliance_score = checks.passed() as f64 / ComplianceChecks::TOTAL as f64 * 100.0;
        let recommendations = if compliance_score > 90.0 {
            Vec::new()
        } else {
            vec![
                "review_color_usage".to_string(),
                "enhance_cosmic_elements".to_string(),
            ]
        };

        ComplianceReport {
            compliance_score: Some(compliance_score),
            checks,
            style_guide_followed: "kurzgesagt_quantified_v4.1".to_string(),
            recommendations,
        }
    }

    fn concept_colors(&self, concept: &str) -> Vec<String> {
        let lower = concept.to_lowercase();
        if lower.contains("científico") {
            self.style.color_palette.secondary.clone()
        } else if lower.contains("tecnológico") {
            vec!["#3A86FF".to_string(), "#8338EC".to_string()]
        } else if lower.contains("natural") {
            vec!["#06FFA5".to_string(), "#FF6B35".to_string()]
        } else if lower.contains("cósmico") {
            self.style.color_palette.backgrounds.clone()
        } else {
            self.style.color_palette.primary.clone()
        }
    }
}

fn visual_metaphor(concept: &str) -> &'static str {
    let lower = concept.to_lowercase();
    let library = [
        ("complexidade", "intricate_clockwork_mechanism"),
        ("evolução", "tree_growth_timelapse"),
        ("energia", "flowing_particle_streams"),
        ("informação", "network_nodes_lighting_up"),
        ("tempo", "spiral_cosmic_clock"),
        ("escala", "nested_russian_dolls"),
        ("conexão", "web_of_glowing_lines"),
    ];
    for (key, metaphor) in library {
        if lower.contains(key) {
            return metaphor;
        }
    }
    "abstract_geometric_representation"
}

fn animation_type(concept: &str) -> &'static str {
    let lower = concept.to_lowercase();
    let types = [
        ("processo", "step_by_step_reveal"),
        ("comparação", "side_by_side_morphing"),
        ("crescimento", "organic_expansion"),
        ("movimento", "flowing_trajectory"),
        ("transformação", "morphing_sequence"),
    ];
    for (key, animation) in types {
        if lower.contains(key) {
            return animation;
        }
    }
    "gentle_floating_emphasis"
}

fn visual_complexity(concept: &str) -> &'static str {
    match concept.split_whitespace().count() {
        0..=1 => "simple_clean_design",
        2..=3 => "moderate_detail",
        _ => "high_detail_required",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_with_concepts(concepts: &[&str]) -> ContentAnalysis {
        ContentAnalysis {
            key_concepts: concepts.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn question_hook_gets_question_visuals() {
        let service = VisualDesignerService::new();
        let script = Script {
            hook_inicial: "E se o tempo não existisse?".to_string(),
            ..Default::default()
        };
        let design = service.design(&script, &ContentAnalysis::default());
        let hook = design.visual_elements.hook_visuals.unwrap();
        assert_eq!(hook.opening_scene, "cosmic_zoom_in");
        assert_eq!(hook.focal_element, "floating_question_mark_with_particles");
    }

    #[test]
    fn concept_illustrations_cap_at_five() {
        let service = VisualDesignerService::new();
        let analysis = analysis_with_concepts(&["a", "b", "c", "d", "e", "f", "g"]);
        let design = service.design(&Script::default(), &analysis);
        assert_eq!(design.visual_elements.concept_illustrations.len(), 5);
    }

    #[test]
    fn metaphor_library_matches_substrings() {
        assert_eq!(
            visual_metaphor("evolução das espécies"),
            "tree_growth_timelapse"
        );
        assert_eq!(visual_metaphor("entropia"), "abstract_geometric_representation");
    }

    #[test]
    fn mascots_cycle_through_secondary_palette() {
        let service = VisualDesignerService::new();
        let analysis = analysis_with_concepts(&["um", "dois", "três", "quatro"]);
        let design = service.design(&Script::default(), &analysis);
        let mascots = design.visual_elements.characters.unwrap().concept_mascots;
        assert_eq!(mascots.len(), 3);
        assert_eq!(mascots[0].color, "#06FFA5");
        assert_eq!(mascots[1].color, "#3A86FF");
        assert_eq!(mascots[2].color, "#8338EC");
    }

    #[test]
    fn complexity_scales_with_word_count() {
        assert_eq!(visual_complexity("entropia"), "simple_clean_design");
        assert_eq!(visual_complexity("segunda lei"), "moderate_detail");
        assert_eq!(
            visual_complexity("segunda lei da termodinâmica explicada"),
            "high_detail_required"
        );
    }

    #[test]
    fn generated_plan_is_fully_compliant() {
        let service = VisualDesignerService::new();
        let analysis = analysis_with_concepts(&["energia cósmica"]);
        let design = service.design(&Script::default(), &analysis);
        assert_eq!(design.kurzgesagt_compliance.compliance_score, Some(100.0));
        assert!(design.kurzgesagt_compliance.recommendations.is_empty());
    }
}
