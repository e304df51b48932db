use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::pipeline::chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4.1";
const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the newsbrief service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the chat-completions API. Requests are sent unauthenticated when absent.
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API (without the `/v1` suffix).
    pub openai_base_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Soft upper bound on chunk length, in characters.
    pub chunk_size: usize,
    /// Characters carried from the tail of the previous chunk.
    pub chunk_overlap: usize,
    /// Wall-clock bound applied to one whole analysis.
    pub analyze_timeout: Duration,
    /// Per-request timeout applied by the HTTP client talking to the LLM.
    pub llm_request_timeout: Duration,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            analyze_timeout: Duration::from_secs(DEFAULT_ANALYZE_TIMEOUT_SECS),
            llm_request_timeout: Duration::from_secs(DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            server_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chunk_size = parse_optional::<usize>("CHUNK_SIZE")?.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ConfigError::InvalidValue("CHUNK_SIZE".into()));
        }

        Ok(Self {
            openai_api_key: load_env_optional("OPENAI_API_KEY"),
            openai_base_url: load_env_optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            default_model: load_env_optional("DEFAULT_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            chunk_size,
            chunk_overlap: parse_optional("CHUNK_OVERLAP")?.unwrap_or(DEFAULT_CHUNK_OVERLAP),
            analyze_timeout: Duration::from_secs(
                parse_optional("ANALYZE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_ANALYZE_TIMEOUT_SECS),
            ),
            llm_request_timeout: Duration::from_secs(
                parse_optional("LLM_REQUEST_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            ),
            server_port: parse_optional("SERVER_PORT")?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

/// Load `.env` (when present) and parse the configuration from the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        base_url = %config.openai_base_url,
        default_model = %config.default_model,
        chunk_size = config.chunk_size,
        chunk_overlap = config.chunk_overlap,
        analyze_timeout_secs = config.analyze_timeout.as_secs(),
        server_port = ?config.server_port,
        api_key_present = config.openai_api_key.is_some(),
        "Loaded configuration"
    );
    Ok(config)
}
