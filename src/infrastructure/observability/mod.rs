//! Observability infrastructure - LLM request metrics

mod metrics;

pub use metrics::{record_fallback, record_llm_attempt, LlmAttemptMetricParams};

#[cfg(test)]
pub use metrics::testing::CountingRecorder;
