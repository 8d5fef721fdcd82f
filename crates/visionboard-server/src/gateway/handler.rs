use axum::{Json, extract::State};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    GoalTextRequest, KeywordsRequest, KeywordsResponse, PlanResponse, PredictRequest,
    PredictResponse, RephraseResponse, SentimentResponse,
};
use crate::gateway::state::HandlerState;

#[instrument(skip(state, request))]
pub async fn generate_goal_plan_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<PlanResponse>, GatewayError> {
    let request: GoalTextRequest = parse_request(request)?;

    debug!(
        chars = request.text.chars().count(),
        "Expanding goal into a plan"
    );

    let plan = state.generator.expand_goal_plan(&request.text).await?;
    Ok(Json(PlanResponse { plan }))
}

#[instrument(skip(state, request))]
pub async fn keywords_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<KeywordsResponse>, GatewayError> {
    let request: KeywordsRequest = parse_request(request)?;

    let keywords = state.keywords.extract(&request.text, request.top_n)?;

    debug!(count = keywords.len(), top_n = request.top_n, "Extracted keywords");
    Ok(Json(KeywordsResponse { keywords }))
}

#[instrument(skip(state, request))]
pub async fn sentiment_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<SentimentResponse>, GatewayError> {
    let request: GoalTextRequest = parse_request(request)?;

    let sentiment = state.sentiment.analyze(&request.text)?;

    debug!(sentiment = %sentiment, "Classified goal sentiment");
    Ok(Json(SentimentResponse { sentiment }))
}

#[instrument(skip(state, request))]
pub async fn predict_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<PredictResponse>, GatewayError> {
    let request: PredictRequest = parse_request(request)?;

    let score = state
        .predictor
        .predict(&request.title, &request.description)?;

    debug!(score, "Predicted goal success score");
    Ok(Json(PredictResponse { score }))
}

#[instrument(skip(state, request))]
pub async fn rephrase_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<RephraseResponse>, GatewayError> {
    let request: GoalTextRequest = parse_request(request)?;

    let rephrased = state.generator.rephrase_goal(&request.text).await?;
    Ok(Json(RephraseResponse { rephrased }))
}

/// Deserializes the already-parsed JSON body into the endpoint's request
/// type, so schema mismatches come back in the standard error envelope
/// instead of axum's bare rejection.
fn parse_request<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}
