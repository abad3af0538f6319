use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure categories shared by providers, the router and the card generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ProviderUnavailable,
    ApiError,
    Timeout,
    ParseError,
    RateLimit,
    InvalidConfig,
    NetworkError,
    AuthenticationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable => "provider_unavailable",
            Self::ApiError => "api_error",
            Self::Timeout => "timeout",
            Self::ParseError => "parse_error",
            Self::RateLimit => "rate_limit",
            Self::InvalidConfig => "invalid_config",
            Self::NetworkError => "network_error",
            Self::AuthenticationError => "authentication_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized LLM failure
///
/// Every failure crossing a component boundary is one of these. `retryable`
/// is what the router looks at to decide between retrying the same provider
/// and moving on to the next one.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct LlmError {
    message: String,
    kind: ErrorKind,
    retryable: bool,
    provider: Option<String>,
    history: Vec<LlmError>,
}

impl LlmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            message: message.into(),
            kind,
            retryable,
            provider: None,
            history: Vec::new(),
        }
    }

    pub fn provider_unavailable(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(ErrorKind::ProviderUnavailable, message, retryable)
    }

    pub fn api_error(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(ErrorKind::ApiError, message, retryable)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message, true)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message, false)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message, true)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message, false)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, message, true)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationError, message, false)
    }

    /// Tag the failure with the provider it came from
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Attach failures observed before this one, oldest first
    pub fn with_history(mut self, history: Vec<LlmError>) -> Self {
        self.history = history;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Failures from providers tried earlier in the same chain
    pub fn history(&self) -> &[LlmError] {
        &self.history
    }
}
