#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use albumpress_api::config::AppConfig;
use albumpress_api::router;
use albumpress_api::state::AppState;
use albumpress_publisher::{PublishError, PublishOutcome, PublishRequest, PublishService};

/// Build a test `AppConfig` with safe defaults.
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        region: "us-east-1".to_string(),
        amplify_app_id: "test-app".to_string(),
        root_domain: Some("example.com".to_string()),
        publish_bucket: "publish-bucket".to_string(),
        storage_bucket: "storage-bucket".to_string(),
        albums_prefix: "albums".to_string(),
        templates_dir: "templates".into(),
        album_script: None,
    }
}

/// Scripted [`PublishService`] recording every request it receives.
pub struct StubPublisher {
    behavior: Box<dyn Fn(&PublishRequest) -> Result<PublishOutcome, PublishError> + Send + Sync>,
    pub requests: Mutex<Vec<PublishRequest>>,
}

impl StubPublisher {
    pub fn with(
        behavior: impl Fn(&PublishRequest) -> Result<PublishOutcome, PublishError>
            + Send
            + Sync
            + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            behavior: Box::new(behavior),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A stub that always succeeds with the given outcome.
    pub fn succeeding(url: Option<&str>, branch: &str) -> Arc<Self> {
        let url = url.map(str::to_owned);
        let branch = branch.to_owned();
        Self::with(move |_| {
            Ok(PublishOutcome {
                branch: branch.clone(),
                url: url.clone(),
            })
        })
    }
}

#[async_trait]
impl PublishService for StubPublisher {
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome, PublishError> {
        let result = (self.behavior)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(publisher: Arc<StubPublisher>) -> Router {
    router::app(AppState {
        config: Arc::new(test_config()),
        publisher,
    })
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
