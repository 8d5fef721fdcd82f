use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use visionboard::embedding::EmbeddingError;
use visionboard::generation::GenerationError;
use visionboard::predict::PredictError;
use visionboard::sentiment::SentimentError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictError),

    #[error("sentiment analysis failed: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Embedding(_)
            | GatewayError::Prediction(_)
            | GatewayError::Sentiment(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Generation(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
