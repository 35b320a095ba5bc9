//! Worker endpoint handlers
//!
//! All six handlers share the same envelope discipline: an empty body
//! deserializes to the request type's defaults, a malformed body is a 400,
//! a missing required top-level field is a 400 with a static message, and
//! an upstream stage failure degrades into a `status: "error"` payload
//! inside a 200 envelope. Only envelope construction itself can 500.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::application::dto::{
    AnalyzeContentRequest, AnalyzePerformanceRequest, AssessQualityRequest, DesignVisualsRequest,
    GenerateScriptRequest, SynthesizeAudioRequest,
};
use crate::infrastructure::state::AppState;

const VERSION: &str = "4.1.0";

/// Client and processing errors, rendered as the legacy JSON envelopes.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Internal {
        worker: &'static str,
        message: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal { worker, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": message,
                    "worker": worker,
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response(),
        }
    }
}

/// An empty body means "all defaults"; anything else must be valid JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Invalid JSON payload"))
}

fn to_value<T: Serialize>(worker: &'static str, payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Internal {
        worker,
        message: e.to_string(),
    })
}

fn stage_error(error: impl std::fmt::Display) -> Value {
    json!({
        "status": "error",
        "error": error.to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "vertice-engine",
        "version": VERSION,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn analyze_content(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "content-analyzer";
    let request: AnalyzeContentRequest = parse_body(&body)?;
    if request.content.is_empty() {
        return Err(ApiError::BadRequest("Content is required"));
    }

    let structure_analysis = match state.content_analyzer.analyze_structure(&request.content).await
    {
        Ok(analysis) => to_value(WORKER, &analysis)?,
        Err(error) => {
            tracing::error!(%error, "structure analysis failed");
            stage_error(error)
        }
    };
    let quality_validation = state.content_analyzer.validate_quality(&request.content);

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "structure_analysis": structure_analysis,
        "quality_validation": to_value(WORKER, &quality_validation)?,
        "processing_time": Utc::now().to_rfc3339(),
        "kurzgesagt_methodology": true,
    })))
}

pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "script-generator";
    let request: GenerateScriptRequest = parse_body(&body)?;
    let Some(content_analysis) = request.content_analysis else {
        return Err(ApiError::BadRequest("Content analysis is required"));
    };

    let script_generation = match state.script_generator.generate(&content_analysis.analysis).await
    {
        Ok(generation) => to_value(WORKER, &generation)?,
        Err(error) => {
            tracing::error!(%error, "script generation failed");
            stage_error(error)
        }
    };

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "script_generation": script_generation,
        "processing_time": Utc::now().to_rfc3339(),
        "kurzgesagt_methodology": true,
        "nihilistic_optimism": true,
    })))
}

pub async fn design_visuals(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "visual-designer";
    let request: DesignVisualsRequest = parse_body(&body)?;
    let (Some(script), Some(content_analysis)) = (request.script, request.content_analysis) else {
        return Err(ApiError::BadRequest("Script and content analysis are required"));
    };

    let visual_design = state
        .visual_designer
        .design(&script, &content_analysis.analysis);

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "visual_design": to_value(WORKER, &visual_design)?,
        "processing_time": Utc::now().to_rfc3339(),
        "kurzgesagt_style": true,
        "imagen_integration": true,
    })))
}

pub async fn synthesize_audio(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "audio-synthesizer";
    let request: SynthesizeAudioRequest = parse_body(&body)?;
    let Some(script) = request.script else {
        return Err(ApiError::BadRequest("Script is required"));
    };

    let audio_synthesis = match state
        .audio_synthesizer
        .synthesize(&script, &request.emotional_tone)
        .await
    {
        Ok(synthesis) => to_value(WORKER, &synthesis)?,
        Err(error) => {
            tracing::error!(%error, "audio synthesis failed");
            stage_error(error)
        }
    };

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "audio_synthesis": audio_synthesis,
        "processing_time": Utc::now().to_rfc3339(),
        "tts_integration": true,
        "kurzgesagt_audio_optimization": true,
    })))
}

pub async fn assess_quality(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "quality-assurer";
    let request: AssessQualityRequest = parse_body(&body)?;
    let (Some(visual_assets), Some(audio_assets), Some(script), Some(content_analysis)) = (
        request.visual_assets,
        request.audio_assets,
        request.script,
        request.content_analysis,
    ) else {
        return Err(ApiError::BadRequest(
            "All assets (visual, audio, script, content_analysis) are required",
        ));
    };

    let quality_assessment = state
        .quality_assurer
        .assess(
            &visual_assets.visual_design,
            &audio_assets.audio_synthesis,
            &script,
            &content_analysis.analysis,
        )
        .await;

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "quality_assessment": to_value(WORKER, &quality_assessment)?,
        "processing_time": Utc::now().to_rfc3339(),
        "kurzgesagt_standards": true,
        "target_quality_score": state.config.target_quality,
    })))
}

pub async fn analyze_performance(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    const WORKER: &str = "performance-analyzer";
    let request: AnalyzePerformanceRequest = parse_body(&body)?;
    let (Some(_final_video), Some(processing_metrics), Some(targets)) = (
        request.final_video,
        request.processing_metrics,
        request.targets,
    ) else {
        return Err(ApiError::BadRequest(
            "Final video, processing metrics, and targets are required",
        ));
    };

    let performance_analysis = state
        .performance_analyzer
        .analyze(&processing_metrics, &targets);

    Ok(Json(json!({
        "worker": WORKER,
        "version": VERSION,
        "performance_analysis": to_value(WORKER, &performance_analysis)?,
        "processing_time": Utc::now().to_rfc3339(),
        "predictive_modeling": true,
        "kurzgesagt_benchmarks": true,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig {
            textgen_base_url: "http://localhost:11434/v1".to_string(),
            textgen_model: "llama3.2".to_string(),
            tts_base_url: "http://localhost:5002".to_string(),
            storage_base_url: None,
            storage_bucket: "vertice-audio".to_string(),
            target_quality: 9.0,
            server_port: 8080,
        }))
    }

    #[tokio::test]
    async fn empty_body_is_rejected_before_any_upstream_call() {
        let result = analyze_content(State(test_state()), Bytes::new()).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest("Content is required"))
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_a_client_error() {
        let result = analyze_content(State(test_state()), Bytes::from_static(b"{not json")).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest("Invalid JSON payload"))
        ));
    }

    #[tokio::test]
    async fn each_worker_reports_its_missing_required_field() {
        let state = test_state();
        let empty = Bytes::from_static(b"{}");

        let result = generate_script(State(state.clone()), empty.clone()).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest("Content analysis is required"))
        ));

        let result = design_visuals(State(state.clone()), empty.clone()).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest("Script and content analysis are required"))
        ));

        let result = synthesize_audio(State(state.clone()), empty.clone()).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest("Script is required"))
        ));

        let result = assess_quality(State(state.clone()), empty.clone()).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest(
                "All assets (visual, audio, script, content_analysis) are required"
            ))
        ));

        let result = analyze_performance(State(state), empty).await;
        assert!(matches!(
            result,
            Err(ApiError::BadRequest(
                "Final video, processing metrics, and targets are required"
            ))
        ));
    }

    #[tokio::test]
    async fn partial_quality_request_is_still_rejected() {
        let body = Bytes::from(r#"{"script": {}, "content_analysis": {}}"#);
        let result = assess_quality(State(test_state()), body).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn sparse_quality_request_assesses_with_documented_defaults() {
        let body = Bytes::from(
            r#"{
                "visual_assets": {},
                "audio_assets": {},
                "script": {},
                "content_analysis": {}
            }"#,
        );
        let Json(envelope) = assess_quality(State(test_state()), body).await.unwrap();

        assert_eq!(envelope["worker"], "quality-assurer");
        assert_eq!(envelope["target_quality_score"], 9.0);
        let assessment = &envelope["quality_assessment"];
        assert_eq!(assessment["status"], "success");
        // a missing compliance block reads as the 80-point baseline
        assert_eq!(
            assessment["quality_assessments"]["visual_assessment"]["detailed_scores"]
                ["kurzgesagt_style_adherence"],
            8.0
        );
    }

    #[tokio::test]
    async fn performance_analysis_runs_without_upstream_services() {
        let body = Bytes::from(
            r#"{
                "final_video": {"video_id": "v1"},
                "processing_metrics": {
                    "start_time": "2026-08-23T10:00:00Z",
                    "end_time": "2026-08-23T10:06:00Z"
                },
                "targets": {}
            }"#,
        );
        let Json(envelope) = analyze_performance(State(test_state()), body)
            .await
            .unwrap();

        assert_eq!(envelope["worker"], "performance-analyzer");
        assert_eq!(envelope["version"], VERSION);
        assert_eq!(envelope["predictive_modeling"], true);
        let analysis = &envelope["performance_analysis"];
        assert_eq!(analysis["status"], "success");
        assert_eq!(
            analysis["processing_analysis"]["timing_performance"]["actual_seconds"],
            360.0
        );
    }

    #[tokio::test]
    async fn visual_design_runs_without_upstream_services() {
        let body = Bytes::from(
            r#"{
                "script": {"hook_inicial": "E se o tempo parasse?"},
                "content_analysis": {"analysis": {"key_concepts": ["tempo"]}}
            }"#,
        );
        let Json(envelope) = design_visuals(State(test_state()), body).await.unwrap();

        assert_eq!(envelope["worker"], "visual-designer");
        assert_eq!(envelope["kurzgesagt_style"], true);
        assert_eq!(envelope["visual_design"]["status"], "success");
    }
}
