use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    LlmError, ProviderConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use crate::infrastructure::router::{RetryConfig, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// LLM system settings: which providers to build and how to route between them
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Provider registered as the router default
    #[serde(default)]
    pub primary: Option<ProviderSettings>,
    /// Providers tried, in order, after the primary
    #[serde(default)]
    pub fallbacks: Vec<ProviderSettings>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            primary: None,
            fallbacks: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetrySettings::default(),
        }
    }
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings for one provider; unset generation parameters fall back to
/// the shared values in [`LlmSettings`]
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Registration name and provider label
    pub name: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            model: None,
            api_key: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build the provider configuration, filling gaps from `shared`
    pub fn to_provider_config(&self, shared: &LlmSettings) -> ProviderConfig {
        ProviderConfig {
            provider: Some(self.name.clone()),
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            temperature: Some(self.temperature.unwrap_or(shared.temperature)),
            max_tokens: Some(self.max_tokens.unwrap_or(shared.max_tokens)),
            timeout_secs: Some(self.timeout_secs.unwrap_or(shared.timeout_secs)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    /// Base backoff delay in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub delay_secs: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay_secs: default_retry_delay_secs(),
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> Result<RetryConfig, LlmError> {
        RetryConfig::from_secs_f64(self.attempts, self.delay_secs)
    }
}

fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}

fn default_retry_delay_secs() -> f64 {
    DEFAULT_RETRY_DELAY.as_secs_f64()
}

impl AppConfig {
    /// Load from `config/default`, `config/local`, an optional extra file and
    /// `APP__`-prefixed environment variables, in increasing precedence
    pub fn load(extra_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
