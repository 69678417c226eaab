//! Unit and integration tests for pdfpress-server

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pdfpress_core::{CleanupScheduler, ScratchStore};
use pdfpress_render::{ConversionPipeline, RenderOptions, StrategyRegistry};
use pdfpress_server::{app, AppState, ErrorResponse};
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "pdfpress-test-boundary";
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

fn test_app(dir: &tempfile::TempDir) -> Router {
    let store = ScratchStore::new(dir.path(), CleanupScheduler::new()).unwrap();
    let pipeline = Arc::new(ConversionPipeline::new(
        StrategyRegistry::default(),
        store,
        RenderOptions::default(),
    ));
    app(AppState::new(pipeline), MAX_UPLOAD_BYTES)
}

fn multipart_upload(file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/convert")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "pdfpress");
}

#[tokio::test]
async fn test_convert_text_returns_pdf_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(multipart_upload("notes.txt", b"hello over http"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"notes.pdf\"");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let doc = lopdf::Document::load_mem(&body).unwrap();
    assert!(doc
        .extract_text(&[1])
        .unwrap()
        .contains("hello over http"));
}

#[tokio::test]
async fn test_unsupported_extension_is_415() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(multipart_upload("binary.exe", b"MZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains(".exe"), "{}", error.error);
}

#[tokio::test]
async fn test_malformed_input_is_422() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(multipart_upload("data.json", b"{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n");
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/convert")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = test_app(&dir).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scratch_dir_empty_after_request_settles() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path(), CleanupScheduler::new()).unwrap();
    let cleanup = store.cleanup().clone();
    let pipeline = Arc::new(ConversionPipeline::new(
        StrategyRegistry::default(),
        store,
        RenderOptions::default(),
    ));
    let app = app(AppState::new(pipeline), MAX_UPLOAD_BYTES);

    let response = app
        .oneshot(multipart_upload("notes.txt", b"transient"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // Consume the body so the response is fully delivered.
    let _ = response.into_body().collect().await.unwrap();

    cleanup.flush();
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}
