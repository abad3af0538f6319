use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

use super::http_client::{HttpClientTrait, HttpResponse, TransportError};
use crate::domain::{
    CompletionResult, LlmError, LlmProvider, Message, MessageRole, ProviderConfig, Usage,
    DEFAULT_FINISH_REASON,
};

const DEFAULT_PROVIDER_LABEL: &str = "openai-compatible";
const UNINITIALIZED_LABEL: &str = "unknown";
const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(5);
const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";
const MODELS_SUFFIX: &str = "/models";

/// Provider for any backend speaking the OpenAI chat-completions format
/// (OpenAI, OpenRouter, Ollama, LM Studio, ...)
#[derive(Debug)]
pub struct OpenAiCompatibleProvider<C: HttpClientTrait> {
    client: C,
    config: RwLock<Option<ActiveConfig>>,
}

/// Validated provider configuration
#[derive(Debug, Clone)]
struct ActiveConfig {
    label: Option<String>,
    endpoint: String,
    model: String,
    auth_header: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl ActiveConfig {
    fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let label = config.provider.clone();
        let endpoint = required(config.endpoint.as_deref(), "endpoint", label.as_deref())?;
        let model = required(config.model.as_deref(), "model", label.as_deref())?;

        Ok(Self {
            label,
            endpoint,
            model,
            auth_header: config.api_key().map(|key| format!("Bearer {}", key)),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            timeout: config.timeout(),
        })
    }

    fn provider_label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_PROVIDER_LABEL)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    /// Sibling models endpoint used for liveness probes
    fn models_url(&self) -> String {
        self.endpoint.replace(CHAT_COMPLETIONS_SUFFIX, MODELS_SUFFIX)
    }

    fn with_label(&self, error: LlmError) -> LlmError {
        match self.label {
            Some(ref label) => error.with_provider(label.clone()),
            None => error,
        }
    }
}

fn required(value: Option<&str>, key: &str, provider: Option<&str>) -> Result<String, LlmError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LlmError::invalid_config(format!("Missing required config: {}", key))
            .with_provider(provider.unwrap_or(UNINITIALIZED_LABEL))),
    }
}

impl<C: HttpClientTrait> OpenAiCompatibleProvider<C> {
    /// Create an uninitialized provider
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: RwLock::new(None),
        }
    }

    async fn active_config(&self) -> Option<ActiveConfig> {
        self.config.read().await.clone()
    }

    fn build_request(config: &ActiveConfig, messages: &[Message]) -> serde_json::Value {
        let messages: Vec<ChatMessage<'_>> =
            messages.iter().map(ChatMessage::from_domain).collect();

        serde_json::json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        })
    }

    /// Map an HTTP response to a completion or a classified failure
    fn handle_response(
        config: &ActiveConfig,
        response: HttpResponse,
    ) -> Result<CompletionResult, LlmError> {
        let status = response.status;

        match status {
            200 => Self::parse_response(config, &response.body),
            401 | 403 => Err(LlmError::authentication(format!(
                "Authentication failed: {}",
                status
            ))),
            429 => Err(LlmError::rate_limit("Rate limit exceeded")),
            s if s >= 500 => Err(LlmError::api_error(format!("Server error: {}", s), true)),
            s => Err(LlmError::api_error(
                format!("API error: {} - {}", s, response.body),
                false,
            )),
        }
    }

    fn parse_response(config: &ActiveConfig, body: &str) -> Result<CompletionResult, LlmError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .ok_or_else(|| {
                LlmError::parse(
                    "Failed to parse response: Invalid response format: missing choices",
                )
            })?;

        let message = choice.message.ok_or_else(|| {
            LlmError::parse("Failed to parse response: Invalid response format: missing message")
        })?;

        // An explicit null (tool-call replies) is empty text; an absent key is malformed
        let content = message.content.ok_or_else(|| {
            LlmError::parse("Failed to parse response: Invalid response format: missing content")
        })?;

        let usage = response.usage.unwrap_or_default();

        Ok(
            CompletionResult::new(
                content.unwrap_or_default(),
                response.model.unwrap_or_else(|| config.model.clone()),
            )
            .with_usage(Usage::new(
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            ))
            .with_finish_reason(
                choice
                    .finish_reason
                    .unwrap_or_else(|| DEFAULT_FINISH_REASON.to_string()),
            ),
        )
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiCompatibleProvider<C> {
    async fn initialize(&self, config: ProviderConfig) -> Result<(), LlmError> {
        let active = ActiveConfig::from_config(&config)?;
        *self.config.write().await = Some(active);
        Ok(())
    }

    async fn generate(&self, messages: &[Message]) -> Result<CompletionResult, LlmError> {
        let config = self
            .active_config()
            .await
            .ok_or_else(|| LlmError::invalid_config("Provider not initialized"))?;

        let body = Self::build_request(&config, messages);
        let outcome = self
            .client
            .post_json(&config.endpoint, config.headers(), &body, config.timeout)
            .await;

        let result = match outcome {
            Ok(response) => Self::handle_response(&config, response),
            Err(TransportError::Timeout(_)) => Err(LlmError::timeout("Request timeout")),
            Err(TransportError::Network(e)) => {
                Err(LlmError::network(format!("Network error: {}", e)))
            }
        };

        result.map_err(|e| config.with_label(e))
    }

    async fn check_availability(&self) -> bool {
        let Some(config) = self.active_config().await else {
            return false;
        };

        let mut headers = Vec::new();
        if let Some(ref auth) = config.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }

        matches!(
            self.client
                .get_status(&config.models_url(), headers, AVAILABILITY_TIMEOUT)
                .await,
            Ok(200 | 404 | 405)
        )
    }

    async fn name(&self) -> String {
        match self.config.read().await.as_ref() {
            Some(config) => config.provider_label().to_string(),
            None => UNINITIALIZED_LABEL.to_string(),
        }
    }
}

// OpenAI chat-completions wire types

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn from_domain(message: &'a Message) -> Self {
        let role = match message.role() {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role,
            content: message.content(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    /// `None` when the key is absent, `Some(None)` when it is null
    #[serde(default, deserialize_with = "present")]
    content: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
    #[serde(default)]
    total_tokens: Option<u32>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
