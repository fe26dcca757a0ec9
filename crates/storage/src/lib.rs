//! Object store gateway.
//!
//! [`ObjectStore`] is the seam between the publish flow and object storage:
//! two operations (get, put) over whole objects, with every response body
//! already normalized to an in-memory buffer. The S3-backed implementation
//! lives in [`s3`]; tests inject in-memory fakes.

pub mod error;
pub mod s3;

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use error::StorageError;
pub use s3::S3ObjectStore;

/// A fetched object: its bytes plus the stored content-type, if any.
///
/// This is the only representation of a remote object body outside the
/// gateway; transport-specific body types never escape the implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Whole-object storage operations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object, normalizing the body to an in-memory buffer.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError>;

    /// Write an object, fully overwriting any existing object at `key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;
}

/// Fetch an object and parse it as JSON.
pub async fn get_json<S, T>(store: &S, bucket: &str, key: &str) -> Result<T, StorageError>
where
    S: ObjectStore + ?Sized,
    T: DeserializeOwned,
{
    let object = store.get_object(bucket, key).await?;
    serde_json::from_slice(&object.body).map_err(|source| StorageError::Decode {
        key: key.to_owned(),
        source,
    })
}

/// Read a local file and put it at `key`.
pub async fn copy_local_file<S>(
    store: &S,
    bucket: &str,
    key: &str,
    local_path: &Path,
    content_type: Option<&str>,
) -> Result<(), StorageError>
where
    S: ObjectStore + ?Sized,
{
    let body = tokio::fs::read(local_path).await?;
    store.put_object(bucket, key, body, content_type).await
}

/// Join a relative key under a prefix with exactly one `/`.
///
/// Backslashes in `rel` are normalized to forward slashes; object keys are
/// `/`-separated regardless of host path conventions.
pub fn join_key(prefix: &str, rel: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rel = rel.replace('\\', "/");
    let rel = rel.trim_start_matches('/');
    if prefix.is_empty() {
        rel.to_owned()
    } else {
        format!("{prefix}/{rel}")
    }
}
