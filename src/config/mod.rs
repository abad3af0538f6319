//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, LlmSettings, LogFormat, LoggingConfig, ProviderSettings, RetrySettings,
};
