use crate::api::error::gateway_error_response;
use crate::api::{read_image_field, ErrorCodeResponse, ErrorResponse};
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use labelscan_core::{extraction, ExtractionResult};
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeLabelRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Read the ingredient list off a product label photo
///
/// Stateless: the image is sent straight to the model and discarded after the
/// response. Nothing is persisted.
#[utoipa::path(
    post,
    path = "/api/analyze/",
    tag = "scan",
    request_body(content_type = "multipart/form-data", content = AnalyzeLabelRequest),
    responses(
        (status = 200, description = "Extracted ingredient list", body = ExtractionResult),
        (status = 400, description = "Missing image or client error", body = ErrorResponse),
        (status = 422, description = "Model could not produce a usable result", body = ErrorCodeResponse),
        (status = 429, description = "Gateway rate limit reached", body = ErrorCodeResponse)
    )
)]
pub async fn analyze_label(
    State(gateway): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let image = match read_image_field(multipart).await {
        Ok(image) => image,
        Err(response) => return response,
    };

    match extraction::extract_label(gateway.as_ref(), image).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => gateway_error_response(&e),
    }
}
