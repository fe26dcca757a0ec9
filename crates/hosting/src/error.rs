#[derive(Debug, thiserror::Error)]
pub enum HostingError {
    /// The control plane's not-found sentinel. `ensure_*` operations
    /// swallow this and convert it into a create call; everywhere else it
    /// propagates like any other failure.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Control plane error: {0}")]
    Api(String),
}
