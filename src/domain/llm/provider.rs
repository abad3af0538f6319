use async_trait::async_trait;
use std::fmt::Debug;

use super::{CompletionResult, Message, ProviderConfig};
use crate::domain::LlmError;

/// Trait for LLM backends (OpenAI-compatible HTTP, native SDKs, ...)
///
/// The router only ever talks to this trait.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Validate and store the configuration. Calling it again replaces it.
    async fn initialize(&self, config: ProviderConfig) -> Result<(), LlmError>;

    /// Run one chat completion
    async fn generate(&self, messages: &[Message]) -> Result<CompletionResult, LlmError>;

    /// Best-effort liveness probe
    async fn check_availability(&self) -> bool;

    /// Provider label
    async fn name(&self) -> String;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted provider for router and generator tests
    ///
    /// Outcomes are consumed in order; once the script runs out the last
    /// outcome repeats.
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: String,
        available: bool,
        outcomes: Mutex<VecDeque<Result<CompletionResult, LlmError>>>,
        last: Mutex<Option<Result<CompletionResult, LlmError>>>,
        calls: AtomicUsize,
        availability_checks: AtomicUsize,
    }

    impl MockLlmProvider {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                available: true,
                outcomes: Mutex::new(VecDeque::new()),
                last: Mutex::new(None),
                calls: AtomicUsize::new(0),
                availability_checks: AtomicUsize::new(0),
            }
        }

        pub fn succeeding(name: impl Into<String>, content: &str) -> Self {
            let name = name.into();
            let result = CompletionResult::new(content, format!("{}-model", name));
            Self::new(name).then(Ok(result))
        }

        pub fn failing(name: impl Into<String>, error: LlmError) -> Self {
            Self::new(name).then(Err(error))
        }

        pub fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }

        pub fn then(self, outcome: Result<CompletionResult, LlmError>) -> Self {
            self.outcomes.lock().unwrap().push_back(outcome);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn availability_checks(&self) -> usize {
            self.availability_checks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn initialize(&self, _config: ProviderConfig) -> Result<(), LlmError> {
            Ok(())
        }

        async fn generate(&self, _messages: &[Message]) -> Result<CompletionResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let mut last = self.last.lock().unwrap();
            if let Some(outcome) = self.outcomes.lock().unwrap().pop_front() {
                *last = Some(outcome);
            }

            last.clone().unwrap_or_else(|| {
                Err(LlmError::api_error("No mock outcome configured", false)
                    .with_provider(self.name.clone()))
            })
        }

        async fn check_availability(&self) -> bool {
            self.availability_checks.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        async fn name(&self) -> String {
            self.name.clone()
        }
    }
}
