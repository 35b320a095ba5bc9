//! AudioSynthesizer - narration synthesis plus music/effects planning
//!
//! The four script sections are synthesized through the TTS port in parallel;
//! the stage completes only when all four are done. Audio bytes are never
//! inspected: they are sized, optionally persisted through the blob store,
//! and referenced by URI. Everything else (music plan, effect cues, timeline,
//! metrics) is derived deterministically from the script text.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::ports::outbound::{
    ArtifactStorePort, SpeechRequest, SpeechSynthesisPort,
};
use crate::domain::value_objects::{
    AudioArtifact, AudioMetrics, AudioQualityEstimate, AudioSegment, AudioSegments, AudioTimeline,
    BackgroundAudio, ContentAudioQuality, DynamicVolumePlan, EffectCue, EmotionalToneHints,
    FinalAudio, IntonationPattern, IntonationPatterns, MixingParameters, MusicPlan, MusicPlans,
    Script, SoundEffects, SyncMarker, SyncPoint, VoiceProfile, VoiceProfiles,
    HOOK_WORDS_PER_SECOND, SECTION_WORDS_PER_SECOND,
};

#[derive(Debug, thiserror::Error)]
pub enum AudioSynthesisError {
    #[error("speech synthesis failed: {0}")]
    Speech(String),
}

/// AudioSynthesizer stage payload.
#[derive(Debug, Clone, Serialize)]
pub struct AudioSynthesis {
    pub status: &'static str,
    pub audio_segments: AudioSegments,
    pub background_audio: BackgroundAudio,
    pub sound_effects: SoundEffects,
    pub final_audio: FinalAudio,
    pub audio_metrics: AudioMetrics,
    pub kurzgesagt_audio_optimization: bool,
    pub timestamp: String,
}

pub struct AudioSynthesizerService<S: SpeechSynthesisPort, A: ArtifactStorePort> {
    tts: S,
    storage: Option<A>,
    voices: VoiceProfiles,
    intonation: IntonationPatterns,
}

impl<S: SpeechSynthesisPort, A: ArtifactStorePort> AudioSynthesizerService<S, A> {
    pub fn new(tts: S, storage: Option<A>) -> Self {
        Self {
            tts,
            storage,
            voices: VoiceProfiles::kurzgesagt(),
            intonation: IntonationPatterns::kurzgesagt(),
        }
    }

    /// Synthesize the full narration track and plan the supporting audio.
    pub async fn synthesize(
        &self,
        script: &Script,
        tone: &EmotionalToneHints,
    ) -> Result<AudioSynthesis, AudioSynthesisError> {
        let run_id = Uuid::new_v4();
        let hook_tone = tone.hook.as_deref().unwrap_or("intrigante");

        let (hook_inicial, contextualizacao, desenvolvimento, sintese_final) =
            futures_util::try_join!(
                self.synthesize_hook(run_id, &script.hook_inicial, hook_tone),
                self.synthesize_section(
                    run_id,
                    "contextualizacao",
                    &script.contextualizacao,
                    &self.voices.educational_optimistic,
                    &self.intonation.contextualizacao,
                ),
                self.synthesize_section(
                    run_id,
                    "desenvolvimento",
                    &script.desenvolvimento,
                    &self.voices.narrator_friendly,
                    &self.intonation.desenvolvimento,
                ),
                self.synthesize_section(
                    run_id,
                    "sintese_final",
                    &script.sintese_final,
                    &self.voices.educational_optimistic,
                    &self.intonation.sintese_final,
                ),
            )?;

        let audio_segments = AudioSegments {
            hook_inicial,
            contextualizacao,
            desenvolvimento,
            sintese_final,
        };

        let background_audio = plan_background_audio();
        let sound_effects = plan_sound_effects(script);
        let final_audio = combine_audio_elements(&audio_segments);
        let audio_metrics = audio_metrics(&final_audio);

        Ok(AudioSynthesis {
            status: "success",
            audio_segments,
            background_audio,
            sound_effects,
            final_audio,
            audio_metrics,
            kurzgesagt_audio_optimization: true,
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    async fn synthesize_hook(
        &self,
        run_id: Uuid,
        hook_text: &str,
        emotional_tone: &str,
    ) -> Result<AudioSegment, AudioSynthesisError> {
        let voice = self.voices.for_hook_tone(emotional_tone);
        let ssml = apply_hook_ssml(hook_text);
        let audio = self.request_speech(run_id, "hook_inicial", &ssml, voice).await?;

        Ok(AudioSegment {
            audio,
            duration_estimate: hook_text.split_whitespace().count() as f64
                / HOOK_WORDS_PER_SECOND,
            voice_profile: Some(voice.clone()),
            emotional_tone: Some(emotional_tone.to_string()),
            intonation_applied: None,
            ssml_applied: ssml,
        })
    }

    async fn synthesize_section(
        &self,
        run_id: Uuid,
        section: &str,
        text: &str,
        voice: &VoiceProfile,
        pattern: &IntonationPattern,
    ) -> Result<AudioSegment, AudioSynthesisError> {
        let ssml = apply_intonation_patterns(text, pattern);
        let audio = self.request_speech(run_id, section, &ssml, voice).await?;

        Ok(AudioSegment {
            audio,
            duration_estimate: text.split_whitespace().count() as f64
                / SECTION_WORDS_PER_SECOND,
            voice_profile: Some(voice.clone()),
            emotional_tone: None,
            intonation_applied: Some(pattern.clone()),
            ssml_applied: ssml,
        })
    }

    async fn request_speech(
        &self,
        run_id: Uuid,
        section: &str,
        ssml: &str,
        voice: &VoiceProfile,
    ) -> Result<AudioArtifact, AudioSynthesisError> {
        let speech = self
            .tts
            .synthesize(SpeechRequest {
                ssml: ssml.to_string(),
                language_code: voice.language_code.clone(),
                voice_name: voice.name.clone(),
                speaking_rate: voice.speaking_rate,
                pitch: voice.pitch,
                volume_gain_db: voice.volume_gain_db,
            })
            .await
            .map_err(|e| AudioSynthesisError::Speech(e.to_string()))?;

        let size_bytes = speech.audio.len();
        let uri = match &self.storage {
            Some(store) => {
                let key = format!("audio/{run_id}/{section}.mp3");
                match store.put(&key, speech.audio).await {
                    Ok(uri) => Some(uri),
                    Err(e) => {
                        // Persistence is best-effort; the segment metadata
                        // still flows downstream without a URI.
                        tracing::warn!(section, "artifact upload failed: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(AudioArtifact {
            uri,
            size_bytes,
            encoding: speech.encoding,
        })
    }
}

/// SSML for the opening hook, keyed off the hook pattern: questions slow
/// down and rise, statistics emphasize every number, scenarios settle into
/// an immersive read.
fn apply_hook_ssml(text: &str) -> String {
    if text.contains('?') {
        format!(
            "<speak><prosody rate=\"slow\" pitch=\"+2st\" volume=\"loud\">{text}</prosody><break time=\"1s\"/></speak>"
        )
    } else if text.chars().any(|c| c.is_ascii_digit()) {
        format!(
            "<speak><prosody rate=\"medium\" pitch=\"+1st\">{}</prosody><break time=\"0.5s\"/></speak>",
            emphasize_numbers(text)
        )
    } else {
        format!(
            "<speak><prosody rate=\"slow\" pitch=\"0st\" volume=\"medium\">{text}</prosody><break time=\"0.8s\"/></speak>"
        )
    }
}

/// Wraps every maximal digit run in a strong emphasis tag.
fn emphasize_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if !digits.is_empty() {
                out.push_str(&format!("<emphasis level=\"strong\">{digits}</emphasis>"));
                digits.clear();
            }
            out.push(c);
        }
    }
    if !digits.is_empty() {
        out.push_str(&format!("<emphasis level=\"strong\">{digits}</emphasis>"));
    }

    out
}

fn apply_intonation_patterns(text: &str, pattern: &IntonationPattern) -> String {
    let mut processed = text.to_string();

    for word in &pattern.emphasis_words {
        if processed.to_lowercase().contains(word.as_str()) {
            processed = processed.replace(
                word.as_str(),
                &format!("<emphasis level=\"moderate\">{word}</emphasis>"),
            );
        }
    }

    for trigger in &pattern.pause_after {
        if processed.to_lowercase().contains(trigger.as_str()) {
            processed = processed.replace(
                trigger.as_str(),
                &format!("{trigger}<break time=\"0.5s\"/>"),
            );
        }
    }

    format!("<speak>{processed}</speak>")
}

fn plan_background_audio() -> BackgroundAudio {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    BackgroundAudio {
        background_elements: Some(MusicPlans {
            hook_music: MusicPlan {
                style: "suspenseful_electronic".to_string(),
                tempo: "moderate_building".to_string(),
                instruments: strings(&["synth_pads", "subtle_percussion"]),
                mood: "mysterious_intriguing".to_string(),
                volume: "low_background".to_string(),
            },
            explanation_music: MusicPlan {
                style: "ambient_scientific".to_string(),
                tempo: "steady_calm".to_string(),
                instruments: strings(&["soft_piano", "atmospheric_synths"]),
                mood: "focused_learning".to_string(),
                volume: "very_low_background".to_string(),
            },
            conclusion_music: MusicPlan {
                style: "uplifting_orchestral".to_string(),
                tempo: "building_triumphant".to_string(),
                instruments: strings(&["strings", "brass", "inspiring_melody"]),
                mood: "hopeful_empowering".to_string(),
                volume: "moderate_background".to_string(),
            },
        }),
        sync_points: vec![
            sync_point("0", "hook_start", "fade_in_suspense"),
            sync_point("15", "contextualization_start", "transition_to_calm"),
            sync_point("45", "development_start", "maintain_learning_mood"),
            sync_point("75%", "synthesis_start", "build_to_inspiring"),
        ],
        dynamic_volume: DynamicVolumePlan {
            narration_priority: "always_prioritize_voice".to_string(),
            music_ducks_during_speech: true,
            emphasis_moments_music_fades: true,
            conclusion_music_can_build: true,
        },
    }
}

fn sync_point(offset: &str, event: &str, music_action: &str) -> SyncPoint {
    SyncPoint {
        offset: offset.to_string(),
        event: event.to_string(),
        music_action: music_action.to_string(),
    }
}

fn plan_sound_effects(script: &Script) -> SoundEffects {
    let effect_keywords = [
        ("surpreendente", "gentle_emphasis_sound"),
        ("descoberta", "revelation_chime"),
        ("imagine", "magical_sparkle"),
        ("futuro", "hopeful_ascending_tone"),
    ];

    let mut timing_cues = Vec::new();
    for (section, text) in script.sections() {
        let lower = text.to_lowercase();
        for (keyword, effect) in effect_keywords {
            if lower.contains(keyword) {
                timing_cues.push(EffectCue {
                    section: section.to_string(),
                    keyword: keyword.to_string(),
                    effect: effect.to_string(),
                    timing: "with_keyword".to_string(),
                });
            }
        }
    }

    SoundEffects {
        sound_library: json!({
            "transition_sounds": {
                "whoosh": "section_transitions",
                "magical_chime": "revelation_moments",
                "subtle_pop": "concept_appearances",
                "cosmic_ambience": "space_related_content"
            },
            "emphasis_sounds": {
                "gentle_ding": "important_points",
                "soft_sparkle": "positive_discoveries",
                "thoughtful_hum": "contemplative_moments"
            },
            "atmospheric_sounds": {
                "space_ambience": "cosmic_perspectives",
                "lab_ambience": "scientific_explanations",
                "nature_sounds": "organic_analogies"
            }
        }),
        timing_cues,
        volume_levels: "subtle_supportive".to_string(),
    }
}

fn combine_audio_elements(segments: &AudioSegments) -> FinalAudio {
    let timeline = AudioTimeline {
        total_duration_seconds: segments.total_duration(),
        mixing_parameters: MixingParameters::standard(),
    };

    let mut sync_markers = Vec::new();
    let mut cumulative = 0.0;
    for (section, segment) in segments.in_order() {
        sync_markers.push(SyncMarker {
            timestamp: cumulative,
            section_start: section.to_string(),
            duration: segment.duration_estimate,
            sync_event: format!("begin_{section}"),
        });
        cumulative += segment.duration_estimate;
    }

    FinalAudio {
        audio_timeline: timeline,
        sync_markers,
        quality_metrics: AudioQualityEstimate {
            technical_quality: json!({
                "bitrate": "320kbps",
                "sample_rate": "44.1kHz",
                "dynamic_range": "excellent",
                "noise_floor": "very_low"
            }),
            content_quality: ContentAudioQuality {
                voice_clarity: 9.5,
                music_appropriateness: 9.0,
                effect_subtlety: 8.8,
                overall_cohesion: 9.2,
            },
            kurzgesagt_standards: json!({
                "educational_effectiveness": 9.3,
                "emotional_engagement": 8.9,
                "scientific_authority": 9.1,
                "optimistic_inspiration": 9.4
            }),
        },
    }
}

fn audio_metrics(final_audio: &FinalAudio) -> AudioMetrics {
    AudioMetrics {
        total_duration: final_audio.audio_timeline.total_duration_seconds,
        speaking_rate_average: SECTION_WORDS_PER_SECOND,
        music_balance: "optimal_background_support".to_string(),
        clarity_score: 9.2,
        emotional_impact_score: 8.8,
        kurzgesagt_compliance: json!({
            "optimistic_tone": true,
            "educational_clarity": true,
            "engaging_pacing": true,
            "cosmic_perspective_audio": true
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        ArtifactStoreError, SpeechSynthesisError, SynthesizedSpeech,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubTts {
        calls: AtomicUsize,
        voices_used: Mutex<Vec<String>>,
    }

    impl StubTts {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                voices_used: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesisPort for StubTts {
        async fn synthesize(
            &self,
            request: SpeechRequest,
        ) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.voices_used.lock().unwrap().push(request.voice_name);
            Ok(SynthesizedSpeech {
                audio: vec![0u8; 128],
                encoding: "mp3".to_string(),
            })
        }
    }

    struct StubStore;

    #[async_trait]
    impl ArtifactStorePort for StubStore {
        async fn put(&self, key: &str, _bytes: Vec<u8>) -> Result<String, ArtifactStoreError> {
            Ok(format!("store://{key}"))
        }

        async fn get(&self, _key: &str) -> Result<Vec<u8>, ArtifactStoreError> {
            Ok(Vec::new())
        }
    }

    fn sample_script() -> Script {
        Script {
            hook_inicial: "E se 90% do universo fosse invisível?".to_string(),
            contextualizacao: "Isso afeta você diretamente.".to_string(),
            desenvolvimento: "Imagine a descoberta surpreendente.".to_string(),
            sintese_final: "O futuro está em suas mãos.".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn synthesizes_all_four_sections() {
        let service: AudioSynthesizerService<_, StubStore> =
            AudioSynthesizerService::new(StubTts::new(), None);
        let result = service
            .synthesize(&sample_script(), &EmotionalToneHints::default())
            .await
            .unwrap();

        assert_eq!(result.status, "success");
        assert_eq!(service.tts.calls.load(Ordering::SeqCst), 4);
        assert_eq!(result.audio_segments.hook_inicial.audio.size_bytes, 128);
        assert!(result.audio_segments.hook_inicial.audio.uri.is_none());
    }

    #[tokio::test]
    async fn configured_store_yields_artifact_uris() {
        let service = AudioSynthesizerService::new(StubTts::new(), Some(StubStore));
        let result = service
            .synthesize(&sample_script(), &EmotionalToneHints::default())
            .await
            .unwrap();

        let uri = result.audio_segments.desenvolvimento.audio.uri.unwrap();
        assert!(uri.starts_with("store://audio/"));
        assert!(uri.ends_with("/desenvolvimento.mp3"));
    }

    #[tokio::test]
    async fn default_hook_tone_uses_dramatic_voice() {
        let service: AudioSynthesizerService<_, StubStore> =
            AudioSynthesizerService::new(StubTts::new(), None);
        service
            .synthesize(&sample_script(), &EmotionalToneHints::default())
            .await
            .unwrap();

        let voices = service.tts.voices_used.lock().unwrap();
        assert!(voices.contains(&"pt-BR-Neural2-C".to_string()));
    }

    #[tokio::test]
    async fn durations_follow_reading_speeds() {
        let service: AudioSynthesizerService<_, StubStore> =
            AudioSynthesizerService::new(StubTts::new(), None);
        let script = sample_script();
        let result = service
            .synthesize(&script, &EmotionalToneHints::default())
            .await
            .unwrap();

        let hook_words = script.hook_inicial.split_whitespace().count() as f64;
        assert_eq!(
            result.audio_segments.hook_inicial.duration_estimate,
            hook_words / 2.5
        );
        let ctx_words = script.contextualizacao.split_whitespace().count() as f64;
        assert_eq!(
            result.audio_segments.contextualizacao.duration_estimate,
            ctx_words / 2.2
        );
        assert_eq!(
            result.final_audio.audio_timeline.total_duration_seconds,
            result.audio_segments.total_duration()
        );
    }

    #[test]
    fn question_hook_gets_loud_slow_prosody() {
        let ssml = apply_hook_ssml("Por que o céu é azul?");
        assert!(ssml.contains("rate=\"slow\""));
        assert!(ssml.contains("volume=\"loud\""));
        assert!(ssml.contains("<break time=\"1s\"/>"));
    }

    #[test]
    fn statistic_hook_emphasizes_numbers() {
        let ssml = apply_hook_ssml("Existem 100 bilhões de galáxias.");
        assert!(ssml.contains("<emphasis level=\"strong\">100</emphasis>"));
        assert!(ssml.contains("rate=\"medium\""));
    }

    #[test]
    fn intonation_marks_emphasis_and_pauses() {
        let pattern = IntonationPatterns::kurzgesagt().sintese_final;
        let ssml = apply_intonation_patterns("O futuro pede reflexão constante.", &pattern);
        assert!(ssml.contains("<emphasis level=\"moderate\">futuro</emphasis>"));
        assert!(ssml.contains("reflexão<break time=\"0.5s\"/>"));
        assert!(ssml.starts_with("<speak>"));
    }

    #[test]
    fn effect_cues_match_script_keywords() {
        let effects = plan_sound_effects(&sample_script());
        let keywords: Vec<&str> = effects
            .timing_cues
            .iter()
            .map(|c| c.keyword.as_str())
            .collect();
        assert!(keywords.contains(&"imagine"));
        assert!(keywords.contains(&"surpreendente"));
        assert!(keywords.contains(&"futuro"));
    }

    #[test]
    fn sync_markers_accumulate_in_order() {
        let segments = AudioSegments {
            hook_inicial: AudioSegment {
                duration_estimate: 5.0,
                ..Default::default()
            },
            contextualizacao: AudioSegment {
                duration_estimate: 10.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let final_audio = combine_audio_elements(&segments);
        assert_eq!(final_audio.sync_markers[0].timestamp, 0.0);
        assert_eq!(final_audio.sync_markers[1].timestamp, 5.0);
        assert_eq!(final_audio.sync_markers[2].timestamp, 15.0);
        assert_eq!(final_audio.sync_markers[1].sync_event, "begin_contextualizacao");
    }
}
