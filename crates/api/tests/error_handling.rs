//! Tests for `ApiError` → HTTP response mapping.
//!
//! These tests verify that each `ApiError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `ApiError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;

use albumpress_api::error::ApiError;
use albumpress_core::error::CoreError;
use albumpress_hosting::HostingError;
use albumpress_publisher::PublishError;
use albumpress_storage::StorageError;

/// Helper: convert an `ApiError` into its status code and parsed JSON body.
async fn error_to_response(err: ApiError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_returns_400() {
    let err = ApiError::BadRequest("albumId is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "albumId is required");
}

// ---------------------------------------------------------------------------
// Test: orchestrator validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = ApiError::Publish(PublishError::Core(CoreError::Validation(
        "ownerIdentityId must not be empty".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "ownerIdentityId must not be empty");
}

// ---------------------------------------------------------------------------
// Test: unknown template maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn template_not_found_returns_404() {
    let err = ApiError::Publish(PublishError::Core(CoreError::TemplateNotFound(
        "templates/grid/dist".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Template not found: templates/grid/dist");
}

// ---------------------------------------------------------------------------
// Test: template without entry point maps to 500 with TEMPLATE_INVALID code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn template_invalid_returns_500() {
    let err = ApiError::Publish(PublishError::Core(CoreError::TemplateInvalid(
        "missing index.html at templates/minimal/dist".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "TEMPLATE_INVALID");
}

// ---------------------------------------------------------------------------
// Test: storage failures map to 500 with PUBLISH_FAILED and the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_failure_returns_500_with_message() {
    let err = ApiError::Publish(PublishError::Storage(StorageError::ObjectNotFound {
        bucket: "storage-bucket".into(),
        key: "private/owner/albums/abc/photos/p1.webp".into(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "PUBLISH_FAILED");
    assert_eq!(
        json["error"],
        "Object not found: s3://storage-bucket/private/owner/albums/abc/photos/p1.webp"
    );
}

// ---------------------------------------------------------------------------
// Test: control-plane failures map to 500 with PUBLISH_FAILED
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hosting_failure_returns_500() {
    let err = ApiError::Publish(PublishError::Hosting(HostingError::Api(
        "throttled".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "PUBLISH_FAILED");
}
