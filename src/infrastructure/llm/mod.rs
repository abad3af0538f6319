//! LLM provider implementations

mod factory;
mod http_client;
mod openai_compatible;

pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse, TransportError};
pub use openai_compatible::OpenAiCompatibleProvider;
