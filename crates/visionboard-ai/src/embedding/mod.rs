//! Embedding + model utilities.
//!
//! - [`encoder`] provides sentence embeddings for prediction and keyword ranking.
//! - [`bert`] wraps a BERT sequence-classification head used by [`crate::sentiment`].

/// BERT classifier wrapper used by the sentiment analyzer.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence embedder (MiniLM-class).
pub mod encoder;
mod error;

pub use encoder::{EMBEDDING_DIM, EmbedderConfig, GoalEmbedder, MAX_SEQ_LEN};
pub use error::EmbeddingError;
