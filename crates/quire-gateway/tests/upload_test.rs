//! Tests for the /extract-text multipart upload endpoint. Real PDF parsing
//! needs real PDF bytes, so these cover the validation and error paths.


use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use quire_gateway::create_router;
use test_helpers::make_test_state;

const BOUNDARY: &str = "quire-test-boundary";

/// Hand-built multipart body with a single field.
fn multipart_body(field_name: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let (state, _dir) = make_test_state("[]");
    let app = create_router(state);

    let req = Request::builder()
        .method("POST")
        .uri("/extract-text")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let body = multipart_body("attachment", "doc.pdf", b"ignored");
    let (status, json) = post_multipart(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_non_pdf_bytes_is_server_error() {
    let body = multipart_body("file", "doc.pdf", b"definitely not a pdf");
    let (status, json) = post_multipart(body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("extract"));
}

#[tokio::test]
async fn test_upload_without_multipart_content_type_is_rejected() {
    let (state, _dir) = make_test_state("[]");
    let app = create_router(state);

    let req = Request::builder()
        .method("POST")
        .uri("/extract-text")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"file":"x"}"#))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    // Multipart extractor rejects non-multipart requests outright
    assert!(resp.status().is_client_error());
}
