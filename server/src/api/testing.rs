use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses(
        (status = 200, description = "Health check response", body = PingResponse)
    )
)]
pub async fn unauthed_ping() -> impl IntoResponse {
    Json(PingResponse {
        message: "ping".to_string(),
    })
}
