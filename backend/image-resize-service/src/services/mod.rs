//! Service layer for the resize pipeline
//!
//! - Classifier: routes object keys to processing or skip
//! - Resize: decode, normalize, resample and re-encode
//! - Storage: object store trait plus S3 and filesystem adapters
//! - Notification: status messages over a publisher trait
//! - Pipeline: per-batch orchestration

pub mod classifier;
pub mod notification;
pub mod pipeline;
pub mod resize;
pub mod storage;

pub use classifier::{classify, is_supported, Classification};
pub use notification::{LogPublisher, NotificationEmitter, NotificationPublisher, SnsPublisher};
pub use pipeline::{EventProcessor, DESTINATION_PREFIX};
pub use resize::{ImageBuffer, ResizeEngine, ResizeTarget, TransformError};
pub use storage::{FsObjectStore, ObjectStore, S3ObjectStore, StoredObject};
