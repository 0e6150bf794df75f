pub mod analyze;
pub mod error;
pub mod extract;
pub mod run_pipeline;
pub mod testing;

use crate::AppState;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use labelscan_core::{ExtractionResult, ImageData, IngredientSafety, ProductSafetyReport};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error response carrying a machine-readable code alongside the message
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorCodeResponse {
    pub code: String,
    pub message: String,
}

/// Returns the router for all /api endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analyze/", post(analyze::analyze_label))
        .route("/api/extract/", post(extract::extract_report))
        .route("/api/run-pipeline/", post(run_pipeline::run_pipeline))
        .route("/api/test/unauthed-ping", get(testing::unauthed_ping))
}

/// Pull the `image` field out of a multipart upload.
///
/// Returns the ready-to-send error response on failure, so handlers can
/// reject bad uploads before any Gateway call is made.
pub(crate) async fn read_image_field(mut multipart: Multipart) -> Result<ImageData, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(no_image_response()),
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                return Err((
                    e.status(),
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart data: {}", e.body_text()),
                    }),
                )
                    .into_response());
            }
        };

        if field.name() != Some("image") {
            continue;
        }

        let data = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Field read error: {}", e);
                return Err((
                    e.status(),
                    Json(ErrorResponse {
                        error: format!("Failed to read image data: {}", e.body_text()),
                    }),
                )
                    .into_response());
            }
        };

        if data.is_empty() {
            return Err(no_image_response());
        }

        // Uploads are assumed JPEG-compatible; no format sniffing here.
        return Ok(ImageData::jpeg(data.to_vec()));
    }
}

fn no_image_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "No image provided".to_string(),
        }),
    )
        .into_response()
}

/// Generate the OpenAPI spec for the service
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        analyze::analyze_label,
        extract::extract_report,
        run_pipeline::run_pipeline,
        testing::unauthed_ping,
    ),
    components(schemas(
        ErrorResponse,
        ErrorCodeResponse,
        analyze::AnalyzeLabelRequest,
        extract::ExtractReportRequest,
        testing::PingResponse,
        ExtractionResult,
        ProductSafetyReport,
        IngredientSafety,
    ))
)]
pub struct ApiDoc;
