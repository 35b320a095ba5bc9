//! HTTP surface - the six worker endpoints

mod worker_routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::infrastructure::state::AppState;

pub use worker_routes::ApiError;

/// Create all worker routes, wrapped in the permissive CORS stack.
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(worker_routes::health))
        .route(
            "/workers/content-analyzer",
            post(worker_routes::analyze_content),
        )
        .route(
            "/workers/script-generator",
            post(worker_routes::generate_script),
        )
        .route(
            "/workers/visual-designer",
            post(worker_routes::design_visuals),
        )
        .route(
            "/workers/audio-synthesizer",
            post(worker_routes::synthesize_audio),
        )
        .route(
            "/workers/quality-assurer",
            post(worker_routes::assess_quality),
        )
        .route(
            "/workers/performance-analyzer",
            post(worker_routes::analyze_performance),
        )
        .layer(cors_layer())
        .layer(middleware::from_fn(preflight_no_content))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Preflight requests answer 204 No Content. `CorsLayer` short-circuits them
/// with a 200 and an empty body; this outer layer rewrites the status while
/// keeping the CORS headers it attached.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
    let mut response = next.run(request).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

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
    async fn preflight_answers_no_content_with_cors_headers() {
        let app = create_routes().with_state(test_state());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/workers/content-analyzer")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn health_is_untouched_by_the_preflight_rewrite() {
        let app = create_routes().with_state(test_state());
        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
