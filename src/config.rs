use std::env;

// ── Defaults ─────────────────────────────────────────────────────────────────

const DEFAULT_BASE_URL: &str = "https://aipipe.org/openrouter/v1";
const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Process configuration, read from the environment once at startup and
/// injected into handlers. Request logic never touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingVar("OPENAI_API_KEY"))?;
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            port,
        })
    }
}
