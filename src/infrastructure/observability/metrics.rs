//! LLM metrics recorded through the `metrics` facade
//!
//! No recorder is installed here; the embedding application picks one.

use std::time::Duration;

use metrics::{counter, histogram};

use crate::domain::LlmError;

/// Parameters for a single provider attempt
pub struct LlmAttemptMetricParams<'a> {
    pub provider: &'a str,
    pub duration: Duration,
    pub error: Option<&'a LlmError>,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Record one call to a provider's `generate`
pub fn record_llm_attempt(params: LlmAttemptMetricParams<'_>) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("status", status_label(params.error)),
    ];

    counter!("llm_requests_total", &labels).increment(1);
    histogram!("llm_request_duration_seconds", &labels).record(params.duration.as_secs_f64());

    if params.error.is_none() {
        counter!("llm_input_tokens_total", &labels).increment(u64::from(params.prompt_tokens));
        counter!("llm_output_tokens_total", &labels)
            .increment(u64::from(params.completion_tokens));
    }
}

/// Record that the router gave up on a provider and moved on
pub fn record_fallback(from_provider: &str, error: &LlmError) {
    let labels = [
        ("provider", from_provider.to_string()),
        ("reason", error.kind().to_string()),
    ];

    counter!("llm_fallbacks_total", &labels).increment(1);
}

fn status_label(error: Option<&LlmError>) -> String {
    match error {
        None => "success".to_string(),
        Some(e) => e.kind().to_string(),
    }
}
