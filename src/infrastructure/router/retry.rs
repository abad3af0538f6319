//! Per-provider retry configuration

use std::time::Duration;

use crate::domain::LlmError;

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Retry configuration applied to every provider in a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total tries per provider, including the first one
    attempts: u32,
    /// Base delay doubled after every failed try
    base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryConfig {
    pub fn new(attempts: u32, base_delay: Duration) -> Result<Self, LlmError> {
        if attempts == 0 {
            return Err(LlmError::invalid_config(
                "Retry attempts must be at least 1",
            ));
        }

        Ok(Self {
            attempts,
            base_delay,
        })
    }

    /// Build from a delay expressed in (fractional) seconds
    pub fn from_secs_f64(attempts: u32, delay_secs: f64) -> Result<Self, LlmError> {
        let base_delay = Duration::try_from_secs_f64(delay_secs).map_err(|e| {
            LlmError::invalid_config(format!("Invalid retry delay {}: {}", delay_secs, e))
        })?;

        Self::new(attempts, base_delay)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay to wait after the failed try `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }
}
