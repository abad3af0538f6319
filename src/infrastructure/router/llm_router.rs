//! LLM Router
//!
//! Routes generation requests across registered providers with per-provider
//! retry and cross-provider fallback.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::RetryConfig;
use crate::domain::{CompletionResult, LlmError, LlmProvider, Message};
use crate::infrastructure::observability::{
    record_fallback, record_llm_attempt, LlmAttemptMetricParams,
};

/// Routes requests to LLM providers with retry and fallback
///
/// Configuration methods take `&mut self`, so a router is fully set up before
/// it is shared (typically behind an `Arc`) with callers of [`generate`].
///
/// [`generate`]: LlmRouter::generate
#[derive(Debug, Default)]
pub struct LlmRouter {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
    default_provider: Option<String>,
    fallback_chain: Vec<String>,
    retry: RetryConfig,
}

impl LlmRouter {
    /// Create an empty router with the default retry configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `name`, replacing any previous one
    pub fn register_provider(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        let name = name.into();

        if self.providers.insert(name.clone(), provider).is_some() {
            warn!(provider = %name, "Replacing already registered LLM provider");
        } else {
            info!(provider = %name, "LLM provider registered");
        }
    }

    pub fn set_default_provider(&mut self, name: &str) -> Result<(), LlmError> {
        self.ensure_registered(name)?;
        self.default_provider = Some(name.to_string());
        Ok(())
    }

    /// Replace the fallback chain. Every name must already be registered.
    pub fn set_fallback_chain<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), LlmError> {
        for name in names {
            self.ensure_registered(name.as_ref())?;
        }

        self.fallback_chain = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(())
    }

    pub fn set_retry_config(&mut self, attempts: u32, delay: Duration) -> Result<(), LlmError> {
        self.retry = RetryConfig::new(attempts, delay)?;
        Ok(())
    }

    pub fn default_provider(&self) -> Option<&str> {
        self.default_provider.as_deref()
    }

    pub fn fallback_chain(&self) -> &[String] {
        &self.fallback_chain
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry
    }

    /// Names of all registered providers, sorted
    pub fn registered_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Probe every registered provider
    pub async fn provider_status(&self) -> Vec<(String, bool)> {
        let mut status = Vec::with_capacity(self.providers.len());

        for name in self.registered_providers() {
            if let Some(provider) = self.providers.get(&name) {
                let available = provider.check_availability().await;
                status.push((name, available));
            }
        }

        status
    }

    /// Ordered, duplicate-free list of providers to try for one request
    ///
    /// Precedence: preferred (if registered), default, then fallbacks.
    pub fn build_provider_chain(&self, preferred: Option<&str>) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();

        if let Some(name) = preferred {
            if self.providers.contains_key(name) {
                chain.push(name.to_string());
            }
        }

        if let Some(ref name) = self.default_provider {
            if !chain.contains(name) {
                chain.push(name.clone());
            }
        }

        for name in &self.fallback_chain {
            if !chain.contains(name) {
                chain.push(name.clone());
            }
        }

        chain
    }

    /// Generate a completion, trying providers in chain order
    ///
    /// Returns the first success. When every provider fails the last failure
    /// is returned, carrying the earlier ones in [`LlmError::history`].
    pub async fn generate(
        &self,
        messages: &[Message],
        preferred: Option<&str>,
    ) -> Result<CompletionResult, LlmError> {
        let chain = self.build_provider_chain(preferred);

        if chain.is_empty() {
            return Err(LlmError::provider_unavailable(
                "No LLM providers available",
                false,
            ));
        }

        let mut failures: Vec<LlmError> = Vec::new();

        for (index, name) in chain.iter().enumerate() {
            let Some(provider) = self.providers.get(name) else {
                continue;
            };
            let has_next = index + 1 < chain.len();

            debug!(provider = %name, "Trying LLM provider");

            if !provider.check_availability().await {
                warn!(provider = %name, "LLM provider is not available, skipping");
                let error = LlmError::provider_unavailable(
                    format!("Provider {} is not available", name),
                    true,
                )
                .with_provider(name.clone());
                if has_next {
                    record_fallback(name, &error);
                }
                failures.push(error);
                continue;
            }

            match self.generate_with_retry(name, provider.as_ref(), messages).await {
                Ok(result) => {
                    info!(provider = %name, model = %result.model(), "Generated completion");
                    return Ok(result);
                }
                Err(error) => {
                    warn!(
                        provider = %name,
                        kind = %error.kind(),
                        retryable = error.is_retryable(),
                        "LLM provider failed: {}",
                        error.message()
                    );
                    if has_next {
                        record_fallback(name, &error);
                    }
                    failures.push(error);
                }
            }
        }

        match failures.pop() {
            Some(last) => Err(last.with_history(failures)),
            None => Err(LlmError::provider_unavailable(
                "All LLM providers failed",
                false,
            )),
        }
    }

    /// Run `generate` against one provider with exponential backoff
    async fn generate_with_retry(
        &self,
        name: &str,
        provider: &dyn LlmProvider,
        messages: &[Message],
    ) -> Result<CompletionResult, LlmError> {
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            let start = Instant::now();
            let outcome = provider.generate(messages).await;
            record_attempt(name, start.elapsed(), &outcome);

            let error = match outcome {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if !error.is_retryable() || attempt + 1 >= attempts {
                return Err(error);
            }

            let delay = self.retry.delay_for_attempt(attempt);
            warn!(
                provider = %name,
                kind = %error.kind(),
                "Retrying in {:?} (attempt {}/{})",
                delay,
                attempt + 1,
                attempts
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn ensure_registered(&self, name: &str) -> Result<(), LlmError> {
        if self.providers.contains_key(name) {
            Ok(())
        } else {
            Err(LlmError::invalid_config(format!(
                "Provider {} not registered",
                name
            )))
        }
    }
}

fn record_attempt(
    provider: &str,
    duration: Duration,
    outcome: &Result<CompletionResult, LlmError>,
) {
    let (usage, error) = match outcome {
        Ok(result) => (result.usage(), None),
        Err(e) => (Default::default(), Some(e)),
    };

    record_llm_attempt(LlmAttemptMetricParams {
        provider,
        duration,
        error,
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
    });
}
