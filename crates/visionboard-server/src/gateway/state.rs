use axum::http::HeaderValue;
use std::sync::Arc;

use visionboard::embedding::GoalEmbedder;
use visionboard::generation::GoalGenerator;
use visionboard::keywords::KeywordExtractor;
use visionboard::predict::SuccessPredictor;
use visionboard::sentiment::SentimentAnalyzer;

#[derive(Clone)]
pub struct HandlerState {
    pub embedder: Arc<GoalEmbedder>,

    pub predictor: Arc<SuccessPredictor>,

    pub keywords: Arc<KeywordExtractor>,

    pub sentiment: Arc<SentimentAnalyzer>,

    pub generator: Arc<GoalGenerator>,

    /// Origin granted by the CORS layer. Credentialed requests forbid a
    /// wildcard here, so the origin is carried as an explicit header value.
    pub allowed_origin: HeaderValue,
}

impl HandlerState {
    pub fn new(
        embedder: Arc<GoalEmbedder>,
        predictor: Arc<SuccessPredictor>,
        keywords: Arc<KeywordExtractor>,
        sentiment: Arc<SentimentAnalyzer>,
        generator: Arc<GoalGenerator>,
        allowed_origin: HeaderValue,
    ) -> Self {
        Self {
            embedder,
            predictor,
            keywords,
            sentiment,
            generator,
            allowed_origin,
        }
    }
}
