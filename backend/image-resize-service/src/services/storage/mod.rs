//! Object storage collaborators
//!
//! The pipeline only needs get/put by bucket and key. `S3ObjectStore` talks to
//! Amazon S3; `FsObjectStore` maps buckets onto directories for local runs.

pub mod local;
pub mod s3;

pub use local::FsObjectStore;
pub use s3::S3ObjectStore;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Object body plus the metadata the pipeline carries forward
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an object; a missing object or unreachable store is `AppError::Fetch`
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject>;

    /// Write an object; failures are `AppError::Store`
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<()>;
}
