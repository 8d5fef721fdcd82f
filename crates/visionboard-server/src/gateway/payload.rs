//! Wire types for the VisionBoard AI endpoints.

use serde::{Deserialize, Serialize};
use visionboard::{DEFAULT_TOP_KEYWORDS, Sentiment};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GoalTextRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeywordsRequest {
    pub text: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_KEYWORDS
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictRequest {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlanResponse {
    pub plan: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SentimentResponse {
    pub sentiment: Sentiment,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictResponse {
    pub score: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RephraseResponse {
    pub rephrased: String,
}
