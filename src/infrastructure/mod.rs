//! Infrastructure layer - HTTP providers, routing and services

pub mod llm;
pub mod logging;
pub mod observability;
pub mod router;
pub mod services;
