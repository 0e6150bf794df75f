use crate::api::analyze::AnalyzeLabelRequest;
use crate::api::error::pipeline_error_response;
use crate::api::{read_image_field, ErrorCodeResponse, ErrorResponse};
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use labelscan_core::{pipeline, ProductSafetyReport};

/// Run the full extract-then-analyze pipeline on a label photo
///
/// Sequential, short-circuiting: an extraction failure is returned directly
/// and the analysis step is never attempted.
#[utoipa::path(
    post,
    path = "/api/run-pipeline/",
    tag = "scan",
    request_body(content_type = "multipart/form-data", content = AnalyzeLabelRequest),
    responses(
        (status = 200, description = "Per-ingredient safety report", body = ProductSafetyReport),
        (status = 400, description = "Missing image or client error", body = ErrorResponse),
        (status = 422, description = "Model could not produce a usable result", body = ErrorCodeResponse),
        (status = 429, description = "Gateway rate limit reached", body = ErrorCodeResponse)
    )
)]
pub async fn run_pipeline(
    State(gateway): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let image = match read_image_field(multipart).await {
        Ok(image) => image,
        Err(response) => return response,
    };

    match pipeline::run_label_pipeline(gateway.as_ref(), image).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => pipeline_error_response(&e),
    }
}
