use serde::{Deserialize, Serialize};

pub const DEFAULT_FINISH_REASON: &str = "stop";

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

/// Normalized successful completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    content: String,
    usage: Usage,
    model: String,
    finish_reason: String,
}

impl CompletionResult {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: Usage::default(),
            model: model.into(),
            finish_reason: DEFAULT_FINISH_REASON.to_string(),
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = reason.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn finish_reason(&self) -> &str {
        &self.finish_reason
    }
}
