//! Integration tests for the widget server
//!
//! Tests the upload endpoints, health checks and metrics.


use axum_test::multipart::{MultipartForm, Part};
use fvg_detector::models::{DetectionResult, Label};
use serde_json::Value;

use test_utils::{png_chart, upload_form, TestApiServer, TEST_UPLOAD_LIMIT};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "fvg-detector");
    assert_eq!(body["label_source"], "fixed");
    assert_eq!(body["decoders"], "available");
}

#[tokio::test]
async fn index_serves_upload_form() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let html = response.text();
    assert!(html.contains("FVG Pattern Detector"));
    assert!(html.contains("enctype=\"multipart/form-data\""));
}

#[tokio::test]
async fn api_analyze_returns_trade_when_all_conditions_met() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.png", png_chart(12, 8)))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["verdict"], "Trade Condition Met: Take your Entry");
    assert_eq!(body["trade"], true);
    assert!(body["failed_label"].is_null());
    assert_eq!(body["image"]["width"], 12);
    assert_eq!(body["image"]["height"], 8);
    assert!(body["image"]["data_url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert_eq!(body["checklist"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn api_analyze_reports_first_missing_condition() {
    let app = TestApiServer::with_labels(DetectionResult::from([Label::BslsSsls]));
    let response = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.png", png_chart(4, 4)))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["verdict"], "No Trades: No V-shape recovery");
    assert_eq!(body["trade"], false);
    assert_eq!(body["failed_label"], "Vshape");
    assert_eq!(body["checklist"][0]["passed"], true);
    assert_eq!(body["checklist"][1]["passed"], false);
}

#[tokio::test]
async fn api_analyze_decode_failure_returns_diagnostic() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.jpg", b"not a jpeg".to_vec()))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"], "Error: Could not load image. Check the path.");
    assert!(body.get("verdict").is_none());
}

#[tokio::test]
async fn api_analyze_rejects_unsupported_extension() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.gif", png_chart(4, 4)))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Unsupported file type"));
}

#[tokio::test]
async fn api_analyze_requires_file_field() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let form = MultipartForm::new().add_text("comment", "no chart attached");
    let response = app
        .server
        .post("/api/analyze")
        .multipart(form)
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "Missing 'file' field in upload form");
}

#[tokio::test]
async fn api_analyze_rejects_oversized_upload() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0u8; TEST_UPLOAD_LIMIT + 1]).file_name("chart.png"),
    );
    let response = app
        .server
        .post("/api/analyze")
        .multipart(form)
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 413);
}

#[tokio::test]
async fn missing_decoder_refuses_analysis() {
    let app = TestApiServer::without_decoders();

    let health: Value = app.server.get("/health").await.json();
    assert_eq!(health["status"], "degraded");
    assert!(health["decoders"]
        .as_str()
        .unwrap()
        .contains("JPEG image decoder is not available"));

    let response = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.png", png_chart(4, 4)))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 503);

    let index = app.server.get("/").await.text();
    assert!(index.contains("JPEG image decoder is not available"));
    assert!(!index.contains("<form"));
}

#[tokio::test]
async fn html_analyze_renders_image_and_result() {
    let app = TestApiServer::with_labels(DetectionResult::from([
        Label::BslsSsls,
        Label::Vshape,
        Label::FvgPresent,
        Label::FvgClose,
    ]));
    let response = app
        .server
        .post("/analyze")
        .multipart(upload_form("chart.png", png_chart(4, 4)))
        .await;
    assert_eq!(response.status_code(), 200);

    let html = response.text();
    assert!(html.contains("alt=\"Uploaded Chart\""));
    assert!(html.contains("<h2>Result</h2>"));
    assert!(html.contains("No Trades: No clear draw on liquidity"));
}

#[tokio::test]
async fn html_analyze_shows_decode_diagnostic() {
    let app = TestApiServer::with_labels(DetectionResult::all());
    let response = app
        .server
        .post("/analyze")
        .multipart(upload_form("chart.png", b"garbage".to_vec()))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(response
        .text()
        .contains("Error: Could not load image. Check the path."));
}

#[tokio::test]
async fn metrics_endpoint_tracks_analysis_outcomes() {
    let app = TestApiServer::with_labels(DetectionResult::all());

    let _ = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.png", png_chart(4, 4)))
        .await;
    let _ = app
        .server
        .post("/api/analyze")
        .multipart(upload_form("chart.png", b"garbage".to_vec()))
        .expect_failure()
        .await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
    assert!(body.contains("analyses_total{outcome=\"trade\"} 1"));
    assert!(body.contains("analyses_total{outcome=\"decode_failure\"} 1"));
}

#[tokio::test]
async fn requests_are_independent() {
    let app = TestApiServer::with_labels(DetectionResult::from([Label::Vshape]));

    for _ in 0..3 {
        let body: Value = app
            .server
            .post("/api/analyze")
            .multipart(upload_form("chart.png", png_chart(4, 4)))
            .await
            .json();
        assert_eq!(body["verdict"], "No Trades: Missing BSLS/SSLS condition");
    }
}
