//! VisionBoard AI library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Service configuration from `VISIONBOARD_*` env vars
//!
//! ## Embedding
//! - [`GoalEmbedder`], [`EmbedderConfig`] - Sentence embeddings (supports stub mode)
//!
//! ## Capabilities
//! - [`SuccessPredictor`], [`LinearModel`] - Goal success score prediction
//! - [`KeywordExtractor`] - Embedding-ranked keyword extraction
//! - [`SentimentAnalyzer`], [`Sentiment`] - Binary sentiment classification
//! - [`GoalGenerator`] - Goal plan expansion and motivational rephrasing
//!
//! ## Constants
//! Shared dimension and score-range constants live in [`constants`]. The
//! embedding dimension is fixed at build time; the predictor and the keyword
//! ranker both inherit it from the embedder they are constructed with, so the
//! pipeline cannot mix dimensions at runtime.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod generation;
pub mod keywords;
pub mod predict;
pub mod sentiment;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, DEFAULT_TOP_KEYWORDS, SCORE_MAX, SCORE_MIN,
};
pub use embedding::{EMBEDDING_DIM, EmbedderConfig, EmbeddingError, GoalEmbedder, MAX_SEQ_LEN};
pub use generation::{GenerationError, GeneratorConfig, GoalGenerator, SHORT_GOAL_ADVICE};
pub use keywords::KeywordExtractor;
pub use predict::{
    LinearModel, PredictError, SuccessPredictor, TRAINING_SET, TrainingExample, embedding_text,
};
pub use sentiment::{Sentiment, SentimentAnalyzer, SentimentConfig, SentimentError};
