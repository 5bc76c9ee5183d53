use std::env;

use crate::catalog::DEFAULT_MODEL;
use crate::llm::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, OPENAI_BASE_URL};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    /// Read `LOG_FORMAT`; needed before the subscriber exists.
    pub fn from_env() -> Self {
        parse_env_or("LOG_FORMAT", LogFormat::Text)
    }
}

#[derive(Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: RequestDefaults,
    pub log_format: LogFormat,
}

/// Remote endpoint settings
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Fallback credential when none is passed on the command line. Held in memory only.
    pub api_key: Option<String>,
}

/// Values used when a request parameter is not given explicitly
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| OPENAI_BASE_URL.to_string()),
                api_key: env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
            },
            defaults: RequestDefaults {
                model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                temperature: parse_env_or("DEFAULT_TEMPERATURE", DEFAULT_TEMPERATURE),
                top_p: parse_env_or("DEFAULT_TOP_P", DEFAULT_TOP_P),
                max_output_tokens: parse_env_or("DEFAULT_MAX_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS),
            },
            log_format: LogFormat::from_env(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api", &self.api)
            .field("defaults", &self.defaults)
            .field("log_format", &self.log_format)
            .finish()
    }
}
