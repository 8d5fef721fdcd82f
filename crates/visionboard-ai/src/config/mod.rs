//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VISIONBOARD_*` environment
//! variables. Capabilities with no model configured fall back to their stub
//! or mock backends, so the server always starts.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::embedding::EmbedderConfig;
use crate::generation::GeneratorConfig;
use crate::sentiment::SentimentConfig;

/// Default browser origin allowed by CORS when `VISIONBOARD_ALLOWED_ORIGIN`
/// is not set.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VISIONBOARD_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Browser origin allowed by CORS. Default: `http://localhost:3000`.
    pub allowed_origin: String,

    /// Directory with the sentence-embedding model
    /// (`config.json` + `model.safetensors` + `tokenizer.json`).
    /// Unset selects the deterministic stub embedder.
    pub embedder_model_dir: Option<PathBuf>,

    /// Directory with the sentiment classifier model. Unset selects the
    /// lexicon stub.
    pub sentiment_model_dir: Option<PathBuf>,

    /// Chat-completion model for goal expansion and rephrasing. Unset
    /// selects the mock provider.
    pub generation_model: Option<String>,

    /// Forces the mock generation provider even when a model is configured.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            embedder_model_dir: None,
            sentiment_model_dir: None,
            generation_model: None,
            mock_provider: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VISIONBOARD_PORT";
    const ENV_BIND_ADDR: &'static str = "VISIONBOARD_BIND_ADDR";
    const ENV_ALLOWED_ORIGIN: &'static str = "VISIONBOARD_ALLOWED_ORIGIN";
    const ENV_EMBEDDER_DIR: &'static str = "VISIONBOARD_EMBEDDER_DIR";
    const ENV_SENTIMENT_DIR: &'static str = "VISIONBOARD_SENTIMENT_DIR";
    const ENV_GENERATION_MODEL: &'static str = "VISIONBOARD_GENERATION_MODEL";
    const ENV_MOCK_PROVIDER: &'static str = "VISIONBOARD_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let allowed_origin =
            Self::parse_string_from_env(Self::ENV_ALLOWED_ORIGIN, defaults.allowed_origin);
        let embedder_model_dir = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_DIR);
        let sentiment_model_dir = Self::parse_optional_path_from_env(Self::ENV_SENTIMENT_DIR);
        let generation_model = Self::parse_optional_string_from_env(Self::ENV_GENERATION_MODEL);
        let mock_provider =
            Self::parse_bool_from_env(Self::ENV_MOCK_PROVIDER, defaults.mock_provider);

        Ok(Self {
            port,
            bind_addr,
            allowed_origin,
            embedder_model_dir,
            sentiment_model_dir,
            generation_model,
            mock_provider,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_origin.trim().is_empty() {
            return Err(ConfigError::InvalidOrigin {
                value: self.allowed_origin.clone(),
            });
        }

        if let Some(ref path) = self.embedder_model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.sentiment_model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Embedder configuration for this server config (stub when no model
    /// directory is set).
    pub fn embedder_config(&self) -> EmbedderConfig {
        match &self.embedder_model_dir {
            Some(dir) => EmbedderConfig::new(dir.clone()),
            None => EmbedderConfig::stub(),
        }
    }

    /// Sentiment configuration (stub when no model directory is set).
    pub fn sentiment_config(&self) -> SentimentConfig {
        match &self.sentiment_model_dir {
            Some(dir) => SentimentConfig::new(dir.clone()),
            None => SentimentConfig::stub(),
        }
    }

    /// Generator configuration (mock when no model is set, or when the mock
    /// provider is forced).
    pub fn generator_config(&self) -> GeneratorConfig {
        match &self.generation_model {
            Some(model) => GeneratorConfig {
                model: model.clone(),
                mock_provider: self.mock_provider,
            },
            None => GeneratorConfig::mock(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }
}
