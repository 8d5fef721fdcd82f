//! Binary sentiment classification with a model backend and a lexicon stub.

pub mod config;
pub mod error;


pub use config::{MAX_SEQ_LEN, NUM_LABELS, SentimentConfig};
pub use error::SentimentError;

use candle_core::Tensor;
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::bert::BertClassifier;
use crate::embedding::device::select_device;

/// Sentiment label, serialized in the uppercase wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "accomplish",
    "achieve",
    "amazing",
    "awesome",
    "best",
    "better",
    "confident",
    "determined",
    "eager",
    "excellent",
    "excited",
    "fantastic",
    "good",
    "great",
    "happy",
    "improve",
    "improving",
    "inspired",
    "inspiring",
    "joy",
    "love",
    "motivated",
    "optimistic",
    "positive",
    "progress",
    "proud",
    "strong",
    "succeed",
    "success",
    "thriving",
    "win",
    "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "afraid",
    "angry",
    "anxious",
    "awful",
    "bad",
    "defeated",
    "depressed",
    "discouraged",
    "exhausted",
    "fail",
    "failing",
    "failure",
    "fear",
    "frustrated",
    "hate",
    "hopeless",
    "impossible",
    "lose",
    "losing",
    "miserable",
    "overwhelmed",
    "quit",
    "sad",
    "stressed",
    "stuck",
    "terrible",
    "tired",
    "unhappy",
    "worried",
    "worse",
    "worst",
];

/// Classifies text as positive or negative.
///
/// With a model directory configured, runs a BERT classifier head over the
/// `[CLS]` token. Without one, falls back to deterministic lexicon counting
/// so the rest of the pipeline stays testable.
pub struct SentimentAnalyzer {
    device: candle_core::Device,
    config: SentimentConfig,
    model_loaded: bool,
    model: Option<BertClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model_loaded)
            .finish()
    }
}

impl SentimentAnalyzer {
    pub fn load(config: SentimentConfig) -> Result<Self, SentimentError> {
        if let Err(msg) = config.validate() {
            return Err(SentimentError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentiment analyzer");

        let Some(ref model_dir) = config.model_dir else {
            info!("No sentiment model directory configured, operating in stub mode");
            return Ok(Self::create_stub(device, config));
        };

        if !model_dir.exists() {
            return Err(SentimentError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        for file in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_dir.join(file).exists() {
                return Err(SentimentError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", file, model_dir.display()),
                });
            }
        }

        let model = BertClassifier::load(model_dir, NUM_LABELS, &device).map_err(|e| {
            SentimentError::ModelLoadFailed {
                reason: format!("Failed to load BERT classifier: {}", e),
            }
        })?;

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(|e| {
            SentimentError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            "Sentiment model loaded"
        );

        Ok(Self {
            device,
            config,
            model_loaded: true,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, SentimentError> {
        Self::load(SentimentConfig::stub())
    }

    fn create_stub(device: candle_core::Device, config: SentimentConfig) -> Self {
        Self {
            device,
            config,
            model_loaded: false,
            model: None,
            tokenizer: None,
        }
    }

    /// Classifies `text`; errors from the model backend propagate instead of
    /// defaulting to a label.
    pub fn analyze(&self, text: &str) -> Result<Sentiment, SentimentError> {
        debug!(
            text_len = text.len(),
            model_loaded = self.model_loaded,
            "Classifying sentiment"
        );

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            return self.classify_with_model(text, model, tokenizer);
        }

        Ok(self.classify_with_lexicon(text))
    }

    fn classify_with_model(
        &self,
        text: &str,
        model: &BertClassifier,
        tokenizer: &Tokenizer,
    ) -> Result<Sentiment, SentimentError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| SentimentError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        let mut type_ids: Vec<u32> = encoding.get_type_ids().to_vec();
        let mut mask: Vec<u32> = encoding.get_attention_mask().to_vec();

        if tokens.len() > MAX_SEQ_LEN {
            tokens.truncate(MAX_SEQ_LEN);
            type_ids.truncate(MAX_SEQ_LEN);
            mask.truncate(MAX_SEQ_LEN);
        }

        let input_ids = Tensor::new(&tokens[..], &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(&type_ids[..], &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(&mask[..], &self.device)?.unsqueeze(0)?;

        let logits = model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let scores = logits.flatten_all()?.to_vec1::<f32>()?;

        // SST-2 head convention: index 0 is negative, index 1 is positive.
        Ok(if scores[1] >= scores[0] {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        })
    }

    /// Counts lexicon hits; ties (including no hits at all) land positive.
    fn classify_with_lexicon(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();

        let mut positive = 0usize;
        let mut negative = 0usize;

        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if POSITIVE_WORDS.contains(&token) {
                positive += 1;
            }
            if NEGATIVE_WORDS.contains(&token) {
                negative += 1;
            }
        }

        let sentiment = if positive >= negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };

        debug!(positive, negative, %sentiment, "Classified sentiment (stub)");

        sentiment
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }
}
