//! Gateway client module for the hosted generative model.
//!
//! This module provides:
//! - `GatewayClient` trait for abstracting the model provider
//! - `GeminiClient` implementation over the Gemini REST API
//! - `FakeGateway` for tests
//! - Configuration via environment variables
//! - Prompt templates for extraction and safety analysis
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `GEMINI_API_KEY` (required): API key for the Gemini API
//! - `LABELSCAN_AI_MODEL` (optional): Model name, e.g. "gemini-2.5-flash"
//! - `LABELSCAN_AI_BASE_URL` (optional): API base URL

mod config;
mod fake;
mod gemini;
pub mod prompts;
mod types;

pub use config::{AiConfig, ConfigError};
pub use fake::FakeGateway;
pub use gemini::GeminiClient;
pub use types::{GenerateRequest, ImageData};

use async_trait::async_trait;

use crate::error::GatewayError;

/// Trait for Gateway clients.
///
/// Implementations are stateless beyond configuration and thread-safe; a
/// single client is built at startup and shared read-only across requests.
/// Calls are single-shot and non-streaming.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Send one generation request and return the model's raw text output.
    ///
    /// An empty string is a legal return value; classifying it is the
    /// normalizer's job, not the client's.
    async fn generate(&self, request: GenerateRequest) -> Result<String, GatewayError>;
}
