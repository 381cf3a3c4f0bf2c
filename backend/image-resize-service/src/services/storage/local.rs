/// Filesystem object store for local runs
///
/// Each bucket is a directory under `root` and each key a relative path inside
/// it. Content types are not persisted; `get` infers one from the extension.
use super::{ObjectStore, StoredObject};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve bucket/key to a path, refusing anything that escapes the bucket
    fn object_path(&self, bucket: &str, key: &str) -> std::result::Result<PathBuf, String> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if bucket.is_empty() || bucket.contains(['/', '\\']) || key.is_empty() || escapes {
            return Err(format!("invalid object location {bucket}/{key}"));
        }

        Ok(self.root.join(bucket).join(relative))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        let fetch_error = |message: String| AppError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let path = self.object_path(bucket, key).map_err(fetch_error)?;
        let body = tokio::fs::read(&path)
            .await
            .map_err(|e| fetch_error(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), size = body.len(), "Read object from disk");

        Ok(StoredObject {
            body: Bytes::from(body),
            content_type: content_type_for(key).map(str::to_string),
        })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let store_error = |message: String| AppError::Store {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let path = self.object_path(bucket, key).map_err(store_error)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| store_error(format!("{}: {e}", parent.display())))?;
        }

        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| store_error(format!("{}: {e}", path.display())))?;

        info!(
            path = %path.display(),
            size = body.len(),
            content_type = ?content_type,
            "Wrote object to disk"
        );
        Ok(())
    }
}

fn content_type_for(key: &str) -> Option<&'static str> {
    let ext = Path::new(key).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tiff" | "tif" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
