use thiserror::Error;

/// Error type for Gateway operations.
///
/// Everything that can go wrong between "we sent a request to the model" and
/// "we have a usable structured value" lives here, so the HTTP layer can map
/// each failure to a status code in one place.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Content blocked by the model's safety filter: {reason}")]
    ContentBlocked { reason: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse model output: {message}")]
    MalformedOutput {
        message: String,
        /// Raw model text, kept for server-side logging only.
        raw: String,
    },

    #[error("No ingredient list detected on the label")]
    NoIngredientsDetected,

    #[error("Gateway not configured: {0}")]
    NotConfigured(String),
}
