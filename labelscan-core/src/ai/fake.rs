//! Fake Gateway for testing.
//!
//! Returns deterministic responses based on prompt matching, so tests run
//! without network access or API costs. Also records every request it
//! receives, letting tests assert call counts and prompt contents.

use std::collections::VecDeque;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use super::{GatewayClient, GenerateRequest};
use crate::error::GatewayError;

/// A fake Gateway for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring (first match wins, in registration order). Queued errors take
/// priority over matched responses, one per call.
#[derive(Debug, Default)]
pub struct FakeGateway {
    /// Ordered list of (prompt substring, response) pairs.
    responses: RwLock<Vec<(String, String)>>,
    /// Default response if no pattern matches.
    default_response: RwLock<Option<String>>,
    /// Errors to return before consulting responses, FIFO.
    errors: Mutex<VecDeque<GatewayError>>,
    /// Every request seen, in order.
    calls: Mutex<Vec<GenerateRequest>>,
}

impl FakeGateway {
    /// Create a new FakeGateway with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeGateway that returns a response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let gateway = Self::new();
        gateway.add_response(prompt_contains, response);
        gateway
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(self, response: &str) -> Self {
        *self.default_response.write().unwrap() = Some(response.to_string());
        self
    }

    /// Queue an error; the next call returns it instead of a response.
    pub fn fail_with(&self, error: GatewayError) {
        self.errors.lock().unwrap().push_back(error);
    }

    /// Number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All requests seen so far, in order.
    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayClient for FakeGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GatewayError> {
        let prompt = request.prompt.clone();
        self.calls.lock().unwrap().push(request);

        if let Some(error) = self.errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in self.responses.read().unwrap().iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &*self.default_response.read().unwrap() {
            Some(response) => Ok(response.clone()),
            None => Err(GatewayError::RequestFailed(format!(
                "FakeGateway: no response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }
}
