/// S3 object store
///
/// Thin adapter over `aws_sdk_s3::Client`. SDK errors are flattened into
/// `AppError::Fetch` / `AppError::Store` with the bucket and key attached.
use super::{ObjectStore, StoredObject};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::{debug, info};

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        debug!(bucket = %bucket, key = %key, "Downloading from S3");

        let fetch_error = |message: String| AppError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| fetch_error(DisplayErrorContext(&e).to_string()))?;

        let content_type = response.content_type().map(str::to_string);

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| fetch_error(format!("Failed to read S3 object body: {e}")))?
            .into_bytes();

        debug!(bucket = %bucket, key = %key, size = body.len(), "Downloaded from S3");

        Ok(StoredObject { body, content_type })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| AppError::Store {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(bucket = %bucket, key = %key, size, "Uploaded to S3");
        Ok(())
    }
}
