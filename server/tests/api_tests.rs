//! Endpoint tests driving the real router with a fake Gateway.
//!
//! No network access: the fake matches prompts by substring and records
//! every request, so tests can also assert that cheap validation failures
//! never reach the Gateway at all.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use labelscan_core::{FakeGateway, GatewayError};
use labelscan_server::{api, AppState};
use serde_json::{json, Value};

const EXTRACTION_JSON: &str =
    r#"{"category":"snack","ingredients":["sugar","salt"],"found":true}"#;
const REPORT_JSON: &str = r#"{"summary":"Low risk","analysis":[{"name":"salt","isHarmful":false,"harmfulEffects":"None","riskScore":1}]}"#;

fn server_with(gateway: Arc<FakeGateway>) -> TestServer {
    let state: AppState = gateway;
    TestServer::new(api::router().with_state(state)).unwrap()
}

fn image_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("label.jpg")
            .mime_type("image/jpeg"),
    )
}

#[tokio::test]
async fn test_analyze_returns_parsed_fields() {
    let gateway = Arc::new(FakeGateway::new());
    // Fence-wrapped output, as the vision model often returns despite the
    // "JSON only" instruction.
    gateway.add_response(
        "product label",
        &format!("```json\n{}\n```", EXTRACTION_JSON),
    );
    let server = server_with(gateway.clone());

    let response = server.post("/api/analyze/").multipart(image_form()).await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({
        "category": "snack",
        "ingredients": ["sugar", "salt"],
        "found": true
    }));
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_analyze_missing_image_is_400_before_any_gateway_call() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway.clone());

    let form = MultipartForm::new().add_text("note", "no image here");
    let response = server.post("/api/analyze/").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_pipeline_missing_image_is_400_before_any_gateway_call() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway.clone());

    let form = MultipartForm::new().add_text("note", "no image here");
    let response = server.post("/api/run-pipeline/").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_extract_empty_ingredients_is_400_before_any_gateway_call() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway.clone());

    let response = server
        .post("/api/extract/")
        .json(&json!({ "ingredients": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_extract_missing_ingredients_key_is_400_before_any_gateway_call() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway.clone());

    let response = server.post("/api/extract/").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    // Generic message only; no deserializer detail echoed.
    assert_eq!(body["error"], "No ingredients provided");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_extract_returns_report_verbatim() {
    let gateway = Arc::new(FakeGateway::new().with_default_response(REPORT_JSON));
    let server = server_with(gateway);

    let response = server
        .post("/api/extract/")
        .json(&json!({ "ingredients": ["salt"] }))
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&serde_json::from_str::<Value>(REPORT_JSON).unwrap());
}

#[tokio::test]
async fn test_rate_limit_is_429_on_every_calling_endpoint() {
    for endpoint in ["/api/analyze/", "/api/extract/", "/api/run-pipeline/"] {
        let gateway = Arc::new(FakeGateway::new());
        gateway.fail_with(GatewayError::RateLimited {
            retry_after_secs: Some(30),
        });
        let server = server_with(gateway);

        let response = if endpoint == "/api/extract/" {
            server
                .post(endpoint)
                .json(&json!({ "ingredients": ["salt"] }))
                .await
        } else {
            server.post(endpoint).multipart(image_form()).await
        };

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body: Value = response.json();
        assert_eq!(body["code"], "LIMIT_REACHED", "wrong code for {}", endpoint);
    }
}

#[tokio::test]
async fn test_empty_model_output_is_422_empty_response() {
    let gateway = Arc::new(FakeGateway::new().with_default_response(""));
    let server = server_with(gateway);

    let response = server.post("/api/analyze/").multipart(image_form()).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_RESPONSE");
}

#[tokio::test]
async fn test_unparseable_model_output_is_500_with_generic_message() {
    let gateway =
        Arc::new(FakeGateway::new().with_default_response("Sorry, I can't read this label."));
    let server = server_with(gateway);

    let response = server.post("/api/analyze/").multipart(image_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    // Raw model text is logged, never echoed.
    assert_eq!(body["error"], "Model returned an invalid format");
}

#[tokio::test]
async fn test_pipeline_happy_path_feeds_ingredients_in_order() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.add_response("product label", EXTRACTION_JSON);
    gateway.add_response("Assess the safety", REPORT_JSON);
    let server = server_with(gateway.clone());

    let response = server
        .post("/api/run-pipeline/")
        .multipart(image_form())
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&serde_json::from_str::<Value>(REPORT_JSON).unwrap());

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].prompt.contains("sugar, salt"));
}

#[tokio::test]
async fn test_pipeline_short_circuits_on_extraction_failure() {
    let gateway = Arc::new(FakeGateway::new().with_default_response(
        r#"{"category":"unknown","ingredients":[],"found":false}"#,
    ));
    let server = server_with(gateway.clone());

    let response = server
        .post("/api/run-pipeline/")
        .multipart(image_form())
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "NO_INGREDIENTS_DETECTED");
    // Analysis was never attempted.
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_content_block_is_422_content_blocked() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.fail_with(GatewayError::ContentBlocked {
        reason: "SAFETY".to_string(),
    });
    let server = server_with(gateway);

    let response = server.post("/api/analyze/").multipart(image_form()).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONTENT_BLOCKED");
}

#[tokio::test]
async fn test_get_on_post_route_is_405() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway);

    let response = server.get("/api/analyze/").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unauthed_ping() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway);

    let response = server.get("/api/test/unauthed-ping").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "ping");
}
