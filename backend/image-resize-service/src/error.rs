/// Error types for the image resize service
///
/// Every variant except `Notify` aborts the batch that raised it. Notification
/// errors are logged and dropped by the emitter.
use crate::services::resize::TransformError;
use thiserror::Error;

/// Result type for image-resize-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// The runtime payload is not a well-formed object-created event
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Source object could not be read
    #[error("Failed to fetch s3://{bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },

    /// Decoding, resampling or encoding failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Derivative could not be written
    #[error("Failed to store s3://{bucket}/{key}: {message}")]
    Store {
        bucket: String,
        key: String,
        message: String,
    },

    /// Publishing a status message failed
    #[error("Notification error: {0}")]
    Notify(String),

    /// Startup configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Status code reported to the invoker when this error ends a batch
    pub fn status_code(&self) -> u16 {
        500
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidEvent(err.to_string())
    }
}
