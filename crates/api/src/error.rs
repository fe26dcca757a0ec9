use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use albumpress_core::error::CoreError;
use albumpress_publisher::PublishError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`PublishError`] for publish failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent
/// `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A publish failure from the orchestrator.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Publish(publish) => classify_publish_error(publish),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Publish failed");
        }

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a publish failure into an HTTP status, error code, and message.
///
/// - Validation failures map to 400.
/// - An unknown template maps to 404; a template without its entry point is
///   a broken server-side artifact and maps to 500.
/// - Storage and control-plane failures map to 500 with the operational
///   message surfaced (callers retry the whole publish).
fn classify_publish_error(err: &PublishError) -> (StatusCode, &'static str, String) {
    match err {
        PublishError::Core(CoreError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        PublishError::Core(not_found @ CoreError::TemplateNotFound(_)) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", not_found.to_string())
        }
        PublishError::Core(invalid @ CoreError::TemplateInvalid(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "TEMPLATE_INVALID",
            invalid.to_string(),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "PUBLISH_FAILED",
            other.to_string(),
        ),
    }
}
