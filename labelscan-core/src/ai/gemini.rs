//! Gemini Gateway client.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{AiConfig, GatewayClient, GenerateRequest};
use crate::error::GatewayError;
use async_trait::async_trait;

/// Client for the Gemini `generateContent` API.
#[derive(Debug)]
pub struct GeminiClient {
    config: AiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = AiConfig::from_env()
            .map_err(|e| GatewayError::NotConfigured(e.to_string()))?;
        Ok(Self::new(config))
    }

    pub fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    /// Base64-encoded image bytes.
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Error response from the Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

fn build_request(request: &GenerateRequest) -> GeminiRequest {
    let mut parts = Vec::new();

    if let Some(image) = &request.image {
        parts.push(Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            }),
        });
    }

    parts.push(Part {
        text: Some(request.prompt.clone()),
        inline_data: None,
    });

    let generation_config = if request.temperature.is_some() || request.response_schema.is_some() {
        Some(GenerationConfig {
            temperature: request.temperature,
            // Schema-constrained calls also want a JSON MIME type so the
            // model skips markdown entirely.
            response_mime_type: request
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: request.response_schema.clone(),
        })
    } else {
        None
    };

    GeminiRequest {
        contents: vec![Content { parts }],
        system_instruction: request.system_instruction.as_ref().map(|text| Content {
            parts: vec![Part {
                text: Some(text.clone()),
                inline_data: None,
            }],
        }),
        generation_config,
    }
}

#[async_trait]
impl GatewayClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = build_request(&request);

        tracing::debug!(model = %self.model_name(), "Calling Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GatewayError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        if status != 200 {
            // Try to parse the structured error response
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(GatewayError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(GatewayError::ApiError {
                status,
                message: body,
            });
        }

        let response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::MalformedOutput {
                message: e.to_string(),
                raw: body.clone(),
            })?;

        // A blocked prompt has no candidates; a blocked completion has a
        // SAFETY finish reason. Both map to the same failure.
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(GatewayError::ContentBlocked {
                    reason: reason.clone(),
                });
            }
        }

        let candidate = match response.candidates.into_iter().next() {
            Some(c) => c,
            // No candidates and no block reason: nothing was generated.
            None => return Ok(String::new()),
        };

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GatewayError::ContentBlocked {
                reason: "SAFETY".to_string(),
            });
        }

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}
