use std::path::PathBuf;

/// Classification inputs are truncated to this many tokens.
pub const MAX_SEQ_LEN: usize = 512;

/// The classifier head is binary (SST-2 style: negative, positive).
pub const NUM_LABELS: usize = 2;

/// Sentiment analyzer configuration.
///
/// `model_dir: None` selects the deterministic lexicon stub, which needs no
/// model files.
#[derive(Debug, Clone, Default)]
pub struct SentimentConfig {
    pub model_dir: Option<PathBuf>,
}

impl SentimentConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
        }
    }

    pub fn stub() -> Self {
        Self { model_dir: None }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.model_dir
            && path.as_os_str().is_empty()
        {
            return Err("model_dir cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
