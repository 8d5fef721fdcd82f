//! Cross-cutting, shared constants.
//!
//! The embedding dimension is an invariant shared by the embedder, the
//! prediction model and the keyword ranker. All three take it from the same
//! [`GoalEmbedder`](crate::embedding::GoalEmbedder) instance at construction
//! time, so these constants are defaults rather than load-bearing values.

/// Output dimension of the MiniLM-class sentence embedder.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the embedder per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Lower bound of a goal success score.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of a goal success score.
pub const SCORE_MAX: f64 = 100.0;

/// Default number of keywords returned when the request does not say.
pub const DEFAULT_TOP_KEYWORDS: usize = 5;
