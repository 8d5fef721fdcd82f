use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation provider request failed: {reason}")]
    Provider { reason: String },

    #[error("generation provider returned an empty completion")]
    EmptyCompletion,
}
