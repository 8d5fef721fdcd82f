//! Goal success prediction.
//!
//! The pipeline is fixed: embed `"{title} {description}"`, apply a linear
//! model fitted once at startup over the build-time [`TRAINING_SET`], clamp
//! the raw output to `[0, 100]` and truncate to an integer. The fitted model
//! is immutable afterwards, so any number of requests can score concurrently
//! against it without coordination.
//!
//! # Score Semantics
//!
//! Scores are relative plausibility estimates, not calibrated probabilities.
//! The training set is ten rows in a 384-dimensional feature space, so the
//! fit interpolates its examples exactly and extrapolates everywhere else;
//! the clamp is what keeps far-out inputs inside the contract range.

pub mod dataset;
pub mod error;
pub mod model;


pub use dataset::{TRAINING_SET, TrainingExample, embedding_text};
pub use error::PredictError;
pub use model::LinearModel;

use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::{SCORE_MAX, SCORE_MIN};
use crate::embedding::GoalEmbedder;

/// Scores goal descriptions for likelihood of success.
///
/// Construct once with [`SuccessPredictor::train`] during startup; the
/// instance is then read-only and shareable.
pub struct SuccessPredictor {
    embedder: Arc<GoalEmbedder>,
    model: LinearModel,
}

impl std::fmt::Debug for SuccessPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuccessPredictor")
            .field("dim", &self.model.dim())
            .field("embedder", &self.embedder)
            .finish()
    }
}

impl SuccessPredictor {
    /// Embeds the training set and fits the linear model.
    ///
    /// Called once during startup, before the service accepts requests. Any
    /// failure here must abort startup: there is no fallback score.
    pub fn train(embedder: Arc<GoalEmbedder>) -> Result<Self, PredictError> {
        let texts: Vec<String> = TRAINING_SET.iter().map(|ex| ex.embedding_text()).collect();
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let rows = embedder.embed_batch(&text_refs)?;
        let targets: Vec<f64> = TRAINING_SET.iter().map(|ex| ex.score).collect();

        let model = LinearModel::fit(&rows, &targets)?;

        info!(
            examples = TRAINING_SET.len(),
            dim = model.dim(),
            stub_embedder = embedder.is_stub(),
            "Success model trained"
        );

        Ok(Self { embedder, model })
    }

    /// Scores one goal. Returns an integer in `[0, 100]`.
    pub fn predict(&self, title: &str, description: &str) -> Result<u8, PredictError> {
        let text = embedding_text(title, description);
        let embedding = self.embedder.embed(&text)?;
        let raw = self.model.predict(&embedding)?;

        let score = clamp_score(raw);
        debug!(raw, score, "Predicted goal success score");

        Ok(score)
    }

    /// The fitted model.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// The embedder predictions run through.
    pub fn embedder(&self) -> &Arc<GoalEmbedder> {
        &self.embedder
    }
}

/// Clamps to the score range, then truncates toward zero.
///
/// Truncation (not rounding) is part of the scoring contract: 85.9 scores 85.
fn clamp_score(raw: f64) -> u8 {
    raw.clamp(SCORE_MIN, SCORE_MAX) as u8
}
