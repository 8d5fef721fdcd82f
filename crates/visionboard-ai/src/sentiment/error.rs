use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("sentiment model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load sentiment model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("sentiment inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid sentiment configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for SentimentError {
    fn from(err: candle_core::Error) -> Self {
        SentimentError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for SentimentError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::DeviceUnavailable { device, reason } => {
                SentimentError::DeviceUnavailable { device, reason }
            }
            _ => SentimentError::InferenceFailed {
                reason: err.to_string(),
            },
        }
    }
}
