//! Goal expansion and motivational rephrasing through a chat-completion
//! provider.
//!
//! Both operations share one provider client and one post-processing
//! contract: prompts end in a known marker, and the generated portion is
//! recovered after the last echo of that marker. A mock provider mode
//! fabricates completions so the endpoints stay testable offline; the server
//! falls back to it when no generation model is configured.

mod error;
mod prompts;


pub use error::GenerationError;

use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error, info};

/// Advisory returned for goals too short to expand.
pub const SHORT_GOAL_ADVICE: &str = "Please provide a more meaningful goal to expand.";

/// Model used when no generation model is configured.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

/// Goal generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub model: String,
    pub mock_provider: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GENERATION_MODEL.to_string(),
            mock_provider: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new<S: Into<String>>(model: S) -> Self {
        Self {
            model: model.into(),
            mock_provider: false,
        }
    }

    pub fn mock() -> Self {
        Self {
            model: DEFAULT_GENERATION_MODEL.to_string(),
            mock_provider: true,
        }
    }
}

/// Expands goals into step plans and rephrases them motivationally.
pub struct GoalGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl std::fmt::Debug for GoalGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalGenerator")
            .field("model", &self.config.model)
            .field("mock_provider", &self.config.mock_provider)
            .finish()
    }
}

impl GoalGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        if config.mock_provider {
            info!("Generation provider mocked, completions are fabricated");
        } else {
            info!(model = %config.model, "Generation provider configured");
        }

        Self {
            client: Client::default(),
            config,
        }
    }

    pub fn mock() -> Self {
        Self::new(GeneratorConfig::mock())
    }

    /// Expands a short goal into a 5-step plan.
    ///
    /// Goals shorter than 5 characters after trimming get
    /// [`SHORT_GOAL_ADVICE`] back without a provider call.
    pub async fn expand_goal_plan(&self, text: &str) -> Result<String, GenerationError> {
        let goal = text.trim();
        if goal.chars().count() < 5 {
            debug!(goal_len = goal.len(), "Goal too short to expand");
            return Ok(SHORT_GOAL_ADVICE.to_string());
        }

        let prompt = prompts::expansion_prompt(goal);
        let completion = if self.config.mock_provider {
            prompts::mock_expansion_completion(&prompt, goal)
        } else {
            self.complete(&prompt).await?
        };

        let plan = prompts::extract_plan(&completion, goal);
        if plan.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        debug!(
            goal_len = goal.len(),
            plan_len = plan.len(),
            "Expanded goal into plan"
        );

        Ok(plan)
    }

    /// Rewrites a goal in a motivational tone.
    pub async fn rephrase_goal(&self, text: &str) -> Result<String, GenerationError> {
        let goal = text.trim();

        let prompt = prompts::rephrase_prompt(goal);
        let completion = if self.config.mock_provider {
            prompts::mock_rephrase_completion(&prompt, goal)
        } else {
            self.complete(&prompt).await?
        };

        let rephrased = prompts::extract_rephrased(&completion);
        if rephrased.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        debug!(
            goal_len = goal.len(),
            rephrased_len = rephrased.len(),
            "Rephrased goal"
        );

        Ok(rephrased)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = self
            .client
            .exec_chat(&self.config.model, request, None)
            .await
            .map_err(|e| {
                error!("Provider error: {}", e);
                GenerationError::Provider {
                    reason: e.to_string(),
                }
            })?;

        let text = response
            .first_text()
            .ok_or(GenerationError::EmptyCompletion)?;

        Ok(text.to_string())
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock_provider
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
