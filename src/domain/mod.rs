//! Domain layer - Core types, traits and parsing

pub mod cards;
pub mod error;
pub mod llm;

pub use cards::{parse_cards, Card};
pub use error::{ErrorKind, LlmError};
pub use llm::{
    CompletionResult, LlmProvider, Message, MessageRole, ProviderConfig, Usage,
    DEFAULT_FINISH_REASON, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

#[cfg(test)]
pub use llm::MockLlmProvider;
