//! Flashcard LLM
//!
//! Generates study flashcards and answers from text using interchangeable
//! OpenAI-compatible LLM backends, with:
//! - A provider abstraction over heterogeneous backends
//! - A router with per-provider retry, exponential backoff and fallback
//! - A normalized response and error model

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, LlmSettings, ProviderSettings};
pub use domain::{Card, CompletionResult, ErrorKind, LlmError, LlmProvider, Message};
pub use infrastructure::router::LlmRouter;
pub use infrastructure::services::CardGenerator;

use std::sync::Arc;

use domain::ProviderConfig;
use infrastructure::llm::{HttpClient, LlmProviderFactory};
use tracing::info;

/// Build the router and card generator from settings
///
/// The primary provider becomes the router default; fallbacks are installed
/// as the fallback chain in the order given.
pub async fn create_llm_system(
    settings: &LlmSettings,
) -> Result<(Arc<LlmRouter>, CardGenerator), LlmError> {
    create_llm_system_with_client(settings, HttpClient::new()).await
}

/// Same as [`create_llm_system`] with a caller-supplied HTTP client
pub async fn create_llm_system_with_client(
    settings: &LlmSettings,
    client: HttpClient,
) -> Result<(Arc<LlmRouter>, CardGenerator), LlmError> {
    let mut router = LlmRouter::new();

    if let Some(ref primary) = settings.primary {
        let config = primary.to_provider_config(settings);
        register(&mut router, &primary.name, config, &client).await?;
        router.set_default_provider(&primary.name)?;
    }

    let mut fallback_names = Vec::with_capacity(settings.fallbacks.len());
    for fallback in &settings.fallbacks {
        let config = fallback.to_provider_config(settings);
        register(&mut router, &fallback.name, config, &client).await?;
        fallback_names.push(fallback.name.clone());
    }

    if !fallback_names.is_empty() {
        router.set_fallback_chain(&fallback_names)?;
    }

    let retry = settings.retry.to_retry_config()?;
    router.set_retry_config(retry.attempts(), retry.base_delay())?;

    info!(
        providers = ?router.registered_providers(),
        default = ?router.default_provider(),
        fallbacks = ?router.fallback_chain(),
        "LLM system created"
    );

    let router = Arc::new(router);
    let generator = CardGenerator::new(router.clone());

    Ok((router, generator))
}

async fn register(
    router: &mut LlmRouter,
    name: &str,
    config: ProviderConfig,
    client: &HttpClient,
) -> Result<(), LlmError> {
    let provider =
        LlmProviderFactory::create_openai_compatible_with_client(client.clone(), config).await?;
    router.register_provider(name, provider);
    Ok(())
}
