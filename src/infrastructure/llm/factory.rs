use std::sync::Arc;

use super::http_client::HttpClient;
use super::OpenAiCompatibleProvider;
use crate::domain::{LlmError, LlmProvider, ProviderConfig};

/// Factory for creating initialized LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create and initialize an OpenAI-compatible provider backed by reqwest
    pub async fn create_openai_compatible(
        config: ProviderConfig,
    ) -> Result<Arc<dyn LlmProvider>, LlmError> {
        Self::create_openai_compatible_with_client(HttpClient::new(), config).await
    }

    /// Same as [`create_openai_compatible`](Self::create_openai_compatible)
    /// with a caller-supplied reqwest client (proxies, TLS roots, ...)
    pub async fn create_openai_compatible_with_client(
        client: HttpClient,
        config: ProviderConfig,
    ) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let provider = OpenAiCompatibleProvider::new(client);
        provider.initialize(config).await?;
        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[tokio::test]
    async fn test_create_openai_compatible_provider() {
        let config = ProviderConfig::new("http://localhost:1234/v1/chat/completions", "qwen")
            .with_provider("lmstudio");

        let provider = LlmProviderFactory::create_openai_compatible(config)
            .await
            .unwrap();
        assert_eq!(provider.name().await, "lmstudio");
    }

    #[tokio::test]
    async fn test_factory_rejects_incomplete_config() {
        let config = ProviderConfig {
            provider: Some("openrouter".to_string()),
            endpoint: Some("https://openrouter.ai/api/v1/chat/completions".to_string()),
            ..Default::default()
        };

        let error = LlmProviderFactory::create_openai_compatible(config)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidConfig);
        assert_eq!(error.provider(), Some("openrouter"));
        assert_eq!(error.message(), "Missing required config: model");
    }
}
