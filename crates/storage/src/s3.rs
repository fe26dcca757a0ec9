//! S3-backed [`ObjectStore`] implementation.
//!
//! Thin wrapper over [`aws_sdk_s3::Client`]. The only storage-service
//! knowledge encoded here is error classification (`NoSuchKey` is the
//! not-found sentinel) and body normalization: the response `ByteStream` is
//! collected into one in-memory buffer before it leaves this module.

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::error::StorageError;
use crate::{ObjectStore, StoredObject};

/// Object store gateway over S3.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build from an already-loaded shared SDK configuration.
    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_s3::Client::new(config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match &err {
                SdkError::ServiceError(ctx) if ctx.err().is_no_such_key() => {
                    StorageError::ObjectNotFound {
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                    }
                }
                _ => StorageError::Api(DisplayErrorContext(&err).to_string()),
            })?;

        let content_type = output.content_type.clone();
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| StorageError::UnsupportedBody(err.to_string()))?
            .into_bytes();

        Ok(StoredObject {
            body: bytes.to_vec(),
            content_type,
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .set_content_type(content_type.map(str::to_owned))
            .send()
            .await
            .map_err(|err| StorageError::Api(DisplayErrorContext(&err).to_string()))?;

        tracing::debug!(bucket, key, "Uploaded object");
        Ok(())
    }
}
