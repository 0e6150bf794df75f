//! Mapping from Gateway failures to HTTP responses.
//!
//! Every branch logs the underlying error server-side; the caller only ever
//! sees the status code and the short message/code below.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use labelscan_core::{GatewayError, PipelineError};

use super::{ErrorCodeResponse, ErrorResponse};

/// Convert a Gateway failure into the caller-visible HTTP response.
pub fn gateway_error_response(err: &GatewayError) -> Response {
    match err {
        GatewayError::RateLimited { retry_after_secs } => {
            tracing::error!(retry_after_secs = ?retry_after_secs, "Gateway quota exceeded: {}", err);
            coded_response(
                StatusCode::TOO_MANY_REQUESTS,
                "LIMIT_REACHED",
                "We are receiving too many requests. Please wait 30 seconds and try again.",
            )
        }
        GatewayError::ContentBlocked { reason } => {
            tracing::warn!(reason = %reason, "Gateway blocked the request");
            coded_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONTENT_BLOCKED",
                "The image was rejected by the model's safety filter.",
            )
        }
        GatewayError::EmptyResponse => {
            tracing::warn!("Gateway returned empty output");
            coded_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_RESPONSE",
                "The model returned an empty response. Please try a clearer photo.",
            )
        }
        GatewayError::NoIngredientsDetected => {
            tracing::warn!("No ingredients detected on the label");
            coded_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_INGREDIENTS_DETECTED",
                "No ingredient list was detected in the image.",
            )
        }
        GatewayError::MalformedOutput { message, raw } => {
            // Raw model text is logged for diagnostics, never echoed back.
            tracing::error!(raw = %raw, "Unparseable model output: {}", message);
            plain_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model returned an invalid format",
            )
        }
        GatewayError::RequestFailed(message) => {
            tracing::error!("Gateway request failed: {}", message);
            plain_response(StatusCode::BAD_REQUEST, "Request failed")
        }
        GatewayError::ApiError { status, message } => {
            tracing::error!(gateway_status = status, "Gateway client error: {}", message);
            plain_response(StatusCode::BAD_REQUEST, "Request failed")
        }
        GatewayError::NotConfigured(message) => {
            tracing::error!("Gateway not configured: {}", message);
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Convert a pipeline failure, logging which step it came from.
pub fn pipeline_error_response(err: &PipelineError) -> Response {
    tracing::error!(stage = %err.stage, "Pipeline failed: {}", err.source);
    gateway_error_response(&err.source)
}

fn coded_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorCodeResponse {
            code: code.to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn plain_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
