//! LLM provider domain models and traits

mod config;
mod message;
mod provider;
mod response;

pub use config::{ProviderConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use response::{CompletionResult, Usage, DEFAULT_FINISH_REASON};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
