use crate::api::error::gateway_error_response;
use crate::api::{ErrorCodeResponse, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use labelscan_core::{analysis, ProductSafetyReport};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExtractReportRequest {
    /// Ingredient names to assess, in order. A missing key is treated the
    /// same as an empty list and rejected before any Gateway call.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Produce a safety report for a list of ingredient names
///
/// Judgments come entirely from the model; the service only validates the
/// shape of the report (riskScore 0-10, required fields).
#[utoipa::path(
    post,
    path = "/api/extract/",
    tag = "scan",
    request_body = ExtractReportRequest,
    responses(
        (status = 200, description = "Per-ingredient safety report", body = ProductSafetyReport),
        (status = 400, description = "Missing ingredients or client error", body = ErrorResponse),
        (status = 422, description = "Model could not produce a usable result", body = ErrorCodeResponse),
        (status = 429, description = "Gateway rate limit reached", body = ErrorCodeResponse)
    )
)]
pub async fn extract_report(
    State(gateway): State<AppState>,
    Json(request): Json<ExtractReportRequest>,
) -> impl IntoResponse {
    if request.ingredients.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No ingredients provided".to_string(),
            }),
        )
            .into_response();
    }

    match analysis::analyze_ingredients(gateway.as_ref(), &request.ingredients).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => gateway_error_response(&e),
    }
}
