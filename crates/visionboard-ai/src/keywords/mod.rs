//! Embedding-ranked keyword extraction.
//!
//! Candidates are the stop-word-filtered unigrams and adjacent bigrams of the
//! input text. Each candidate is embedded and scored by cosine similarity
//! against the embedding of the whole document; the `top_n` highest-scoring
//! phrases win. Bigrams are formed over the filtered token stream, so a
//! phrase may bridge a removed stop word ("learn the piano" yields
//! "learn piano").
//!
//! All phrases come back lowercased, in descending similarity order.

mod stopwords;


use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::embedding::{EmbeddingError, GoalEmbedder};
use stopwords::is_stop_word;

/// Ranks candidate phrases from a text by embedding similarity.
///
/// Shares the process-wide [`GoalEmbedder`], so extraction inherits its mode:
/// real model embeddings in production, deterministic stub vectors in tests.
#[derive(Debug)]
pub struct KeywordExtractor {
    embedder: Arc<GoalEmbedder>,
}

impl KeywordExtractor {
    pub fn new(embedder: Arc<GoalEmbedder>) -> Self {
        Self { embedder }
    }

    /// Extracts up to `top_n` keywords from `text`.
    ///
    /// Blank input, `top_n == 0`, or input with no surviving candidates all
    /// return an empty list without touching the embedder.
    pub fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>, EmbeddingError> {
        if text.trim().is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let candidates = candidate_phrases(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let document = self.embedder.embed(text)?;
        let phrases: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&phrases)?;

        let mut scored: Vec<(String, f32)> = candidates
            .into_iter()
            .zip(embeddings.iter())
            .map(|(phrase, embedding)| {
                let score = cosine_similarity(&document, embedding);
                (phrase, score)
            })
            .collect();

        // Stable sort keeps first-occurrence order for tied scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);

        debug!(
            candidates = scored.len(),
            top_n, "Ranked keyword candidates"
        );

        Ok(scored.into_iter().map(|(phrase, _)| phrase).collect())
    }

    pub fn embedder(&self) -> &GoalEmbedder {
        &self.embedder
    }
}

/// Lowercased unigrams and adjacent bigrams, stop words removed, deduplicated
/// in order of first appearance.
fn candidate_phrases(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty() && !is_stop_word(token))
        .collect();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for token in &tokens {
        if seen.insert((*token).to_string()) {
            candidates.push((*token).to_string());
        }
    }
    for pair in tokens.windows(2) {
        let phrase = format!("{} {}", pair[0], pair[1]);
        if seen.insert(phrase.clone()) {
            candidates.push(phrase);
        }
    }

    candidates
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b).max(1e-9)
}
