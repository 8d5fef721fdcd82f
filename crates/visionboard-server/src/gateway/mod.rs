//! HTTP gateway (Axum) for the VisionBoard AI capabilities.
//!
//! This module is primarily used by the `visionboard` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{
    generate_goal_plan_handler, keywords_handler, predict_handler, rephrase_handler,
    sentiment_handler,
};
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    // Credentialed CORS: the browser frontend sends cookies, so the origin
    // must be listed explicitly rather than mirrored from the request.
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/generate_goal_plan", post(generate_goal_plan_handler))
        .route("/keywords", post(keywords_handler))
        .route("/sentiment", post(sentiment_handler))
        .route("/predict", post(predict_handler))
        .route("/rephrase", post(rephrase_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedder_mode: &'static str,
    pub sentiment_mode: &'static str,
    pub generation_mode: &'static str,
    pub prediction: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "VisionBoard AI Service is running",
    })
}

/// Reports which backing each capability is running on. The predictor is
/// fitted before the listener binds, so a served request always sees a
/// trained model.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Json<ReadyResponse> {
    let embedder_mode = if state.embedder.is_stub() {
        "stub"
    } else {
        "real"
    };

    let sentiment_mode = if state.sentiment.is_model_loaded() {
        "model"
    } else {
        "lexicon"
    };

    let generation_mode = if state.generator.is_mock() {
        "mock"
    } else {
        "provider"
    };

    Json(ReadyResponse {
        status: "ok",
        components: ComponentStatus {
            http: "ready",
            embedder_mode,
            sentiment_mode,
            generation_mode,
            prediction: "ready",
        },
    })
}
