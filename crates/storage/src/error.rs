#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: s3://{bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Failed to decode object {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response body could not be normalized to an in-memory buffer.
    #[error("Unsupported object body: {0}")]
    UnsupportedBody(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage API error: {0}")]
    Api(String),
}
