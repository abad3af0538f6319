//! Provider routing with retry and fallback

mod llm_router;
mod retry;

pub use llm_router::LlmRouter;
pub use retry::{RetryConfig, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY};
