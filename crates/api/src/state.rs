use std::sync::Arc;

use albumpress_publisher::PublishService;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`). The publisher is held
/// behind its trait so tests can inject a stub.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub publisher: Arc<dyn PublishService>,
}
