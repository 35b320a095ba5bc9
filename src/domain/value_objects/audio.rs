//! Audio synthesis shapes - output of the AudioSynthesizer stage

use serde::{Deserialize, Serialize};

/// Narration speed used for section duration estimates, in words per second.
pub const SECTION_WORDS_PER_SECOND: f64 = 2.2;
/// Hooks are read slower for impact.
pub const HOOK_WORDS_PER_SECOND: f64 = 2.5;

/// Voice configuration handed to the text-to-speech service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub language_code: String,
    pub name: String,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub volume_gain_db: f64,
    pub characteristics: Vec<String>,
}

/// The three narration voices. Read-only configuration built once at
/// process start.
#[derive(Debug, Clone)]
pub struct VoiceProfiles {
    pub educational_optimistic: VoiceProfile,
    pub narrator_friendly: VoiceProfile,
    pub hook_dramatic: VoiceProfile,
}

impl VoiceProfiles {
    pub fn kurzgesagt() -> Self {
        fn strings(values: &[&str]) -> Vec<String> {
            values.iter().map(|s| s.to_string()).collect()
        }

        Self {
            educational_optimistic: VoiceProfile {
                language_code: "pt-BR".to_string(),
                name: "pt-BR-Neural2-A".to_string(),
                speaking_rate: 0.95,
                pitch: 2.0,
                volume_gain_db: 0.0,
                characteristics: strings(&["clear", "engaging", "optimistic", "educational"]),
            },
            narrator_friendly: VoiceProfile {
                language_code: "pt-BR".to_string(),
                name: "pt-BR-Neural2-B".to_string(),
                speaking_rate: 0.90,
                pitch: 0.0,
                volume_gain_db: 0.0,
                characteristics: strings(&["authoritative", "friendly", "scientific"]),
            },
            hook_dramatic: VoiceProfile {
                language_code: "pt-BR".to_string(),
                name: "pt-BR-Neural2-C".to_string(),
                speaking_rate: 0.85,
                pitch: -2.0,
                volume_gain_db: 2.0,
                characteristics: strings(&["dramatic", "intriguing", "attention-grabbing"]),
            },
        }
    }

    /// Maps an emotional-tone hint onto a voice; unknown tones degrade to
    /// the educational voice.
    pub fn for_hook_tone(&self, emotional_tone: &str) -> &VoiceProfile {
        match emotional_tone {
            "intrigante" | "provocativo" => &self.hook_dramatic,
            "questionador" => &self.narrator_friendly,
            _ => &self.educational_optimistic,
        }
    }
}

/// Per-section SSML emphasis rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntonationPattern {
    pub emphasis_words: Vec<String>,
    pub pause_after: Vec<String>,
    pub tone_shift: String,
}

#[derive(Debug, Clone)]
pub struct IntonationPatterns {
    pub hook_inicial: IntonationPattern,
    pub contextualizacao: IntonationPattern,
    pub desenvolvimento: IntonationPattern,
    pub sintese_final: IntonationPattern,
}

impl IntonationPatterns {
    pub fn kurzgesagt() -> Self {
        fn strings(values: &[&str]) -> Vec<String> {
            values.iter().map(|s| s.to_string()).collect()
        }

        Self {
            hook_inicial: IntonationPattern {
                emphasis_words: strings(&["surpreendente", "incrível", "imagine", "mas", "contudo"]),
                pause_after: strings(&["pergunta", "estatística", "cenário"]),
                tone_shift: "questioning_to_intriguing".to_string(),
            },
            contextualizacao: IntonationPattern {
                emphasis_words: strings(&["você", "isso", "porque", "afeta", "importante"]),
                pause_after: strings(&["relevância pessoal", "experiência"]),
                tone_shift: "personal_to_universal".to_string(),
            },
            desenvolvimento: IntonationPattern {
                emphasis_words: strings(&["descobriu", "revelou", "significa", "portanto"]),
                pause_after: strings(&["conceitos complexos", "analogias"]),
                tone_shift: "building_understanding".to_string(),
            },
            sintese_final: IntonationPattern {
                emphasis_words: strings(&["empoderamento", "futuro", "você pode", "juntos"]),
                pause_after: strings(&["reflexão", "implicações"]),
                tone_shift: "hopeful_empowering".to_string(),
            },
        }
    }
}

/// Emotional-tone hints carried from the script stage; only the hook tone
/// currently influences voice selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionalToneHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextualizacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desenvolvimento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sintese: Option<String>,
}

/// Reference to synthesized narration audio. The bytes themselves live in
/// the blob store when one is configured; the pipeline never inspects them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub size_bytes: usize,
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioSegment {
    #[serde(default)]
    pub audio: AudioArtifact,
    /// Seconds, estimated from word count and reading speed.
    #[serde(default)]
    pub duration_estimate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_profile: Option<VoiceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intonation_applied: Option<IntonationPattern>,
    #[serde(default)]
    pub ssml_applied: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioSegments {
    #[serde(default)]
    pub hook_inicial: AudioSegment,
    #[serde(default)]
    pub contextualizacao: AudioSegment,
    #[serde(default)]
    pub desenvolvimento: AudioSegment,
    #[serde(default)]
    pub sintese_final: AudioSegment,
}

impl AudioSegments {
    pub fn in_order(&self) -> [(&'static str, &AudioSegment); 4] {
        [
            ("hook_inicial", &self.hook_inicial),
            ("contextualizacao", &self.contextualizacao),
            ("desenvolvimento", &self.desenvolvimento),
            ("sintese_final", &self.sintese_final),
        ]
    }

    pub fn total_duration(&self) -> f64 {
        self.in_order()
            .iter()
            .map(|(_, seg)| seg.duration_estimate)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicPlan {
    pub style: String,
    pub tempo: String,
    pub instruments: Vec<String>,
    pub mood: String,
    pub volume: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicPlans {
    pub hook_music: MusicPlan,
    pub explanation_music: MusicPlan,
    pub conclusion_music: MusicPlan,
}

/// Music cue anchored either at an absolute second or a fraction of the
/// total runtime ("75%").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPoint {
    pub offset: String,
    pub event: String,
    pub music_action: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicVolumePlan {
    #[serde(default)]
    pub narration_priority: String,
    #[serde(default)]
    pub music_ducks_during_speech: bool,
    #[serde(default)]
    pub emphasis_moments_music_fades: bool,
    #[serde(default)]
    pub conclusion_music_can_build: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundAudio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_elements: Option<MusicPlans>,
    #[serde(default)]
    pub sync_points: Vec<SyncPoint>,
    #[serde(default)]
    pub dynamic_volume: DynamicVolumePlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCue {
    pub section: String,
    pub keyword: String,
    pub effect: String,
    pub timing: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundEffects {
    #[serde(default)]
    pub sound_library: serde_json::Value,
    #[serde(default)]
    pub timing_cues: Vec<EffectCue>,
    #[serde(default)]
    pub volume_levels: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MixingParameters {
    #[serde(default)]
    pub narration_volume: f64,
    #[serde(default)]
    pub background_music_volume: f64,
    #[serde(default)]
    pub sound_effects_volume: f64,
    #[serde(default)]
    pub crossfade_duration: f64,
    #[serde(default)]
    pub normalization: String,
}

impl MixingParameters {
    /// Narration always wins the mix; music stays subtle.
    pub fn standard() -> Self {
        Self {
            narration_volume: 0.8,
            background_music_volume: 0.2,
            sound_effects_volume: 0.3,
            crossfade_duration: 1.0,
            normalization: "peak_-3db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioTimeline {
    #[serde(default)]
    pub total_duration_seconds: f64,
    #[serde(default)]
    pub mixing_parameters: MixingParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncMarker {
    pub timestamp: f64,
    pub section_start: String,
    pub duration: f64,
    pub sync_event: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAudioQuality {
    #[serde(default)]
    pub voice_clarity: f64,
    #[serde(default)]
    pub music_appropriateness: f64,
    #[serde(default)]
    pub effect_subtlety: f64,
    #[serde(default)]
    pub overall_cohesion: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioQualityEstimate {
    #[serde(default)]
    pub technical_quality: serde_json::Value,
    #[serde(default)]
    pub content_quality: ContentAudioQuality,
    #[serde(default)]
    pub kurzgesagt_standards: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalAudio {
    #[serde(default)]
    pub audio_timeline: AudioTimeline,
    #[serde(default)]
    pub sync_markers: Vec<SyncMarker>,
    #[serde(default)]
    pub quality_metrics: AudioQualityEstimate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioMetrics {
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub speaking_rate_average: f64,
    #[serde(default)]
    pub music_balance: String,
    #[serde(default)]
    pub clarity_score: f64,
    #[serde(default)]
    pub emotional_impact_score: f64,
    #[serde(default)]
    pub kurzgesagt_compliance: serde_json::Value,
}

/// The full AudioSynthesizer stage payload as the QualityAssurer receives it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioSynthesisPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub audio_segments: AudioSegments,
    #[serde(default)]
    pub background_audio: BackgroundAudio,
    #[serde(default)]
    pub sound_effects: SoundEffects,
    #[serde(default)]
    pub final_audio: FinalAudio,
    #[serde(default)]
    pub audio_metrics: AudioMetrics,
    #[serde(default)]
    pub kurzgesagt_audio_optimization: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_tone_maps_to_dramatic_voice() {
        let profiles = VoiceProfiles::kurzgesagt();
        assert_eq!(profiles.for_hook_tone("intrigante").name, "pt-BR-Neural2-C");
        assert_eq!(
            profiles.for_hook_tone("surpreendente").name,
            "pt-BR-Neural2-A"
        );
        assert_eq!(
            profiles.for_hook_tone("tom_desconhecido").name,
            "pt-BR-Neural2-A"
        );
    }

    #[test]
    fn segments_sum_durations_in_section_order() {
        let segments = AudioSegments {
            hook_inicial: AudioSegment {
                duration_estimate: 6.0,
                ..Default::default()
            },
            contextualizacao: AudioSegment {
                duration_estimate: 13.0,
                ..Default::default()
            },
            desenvolvimento: AudioSegment {
                duration_estimate: 60.0,
                ..Default::default()
            },
            sintese_final: AudioSegment {
                duration_estimate: 21.0,
                ..Default::default()
            },
        };
        assert_eq!(segments.total_duration(), 100.0);
        assert_eq!(segments.in_order()[0].0, "hook_inicial");
    }
}
