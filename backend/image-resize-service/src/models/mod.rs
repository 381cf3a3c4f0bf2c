/// Data models for image-resize-service
///
/// Includes the incoming S3 event document, per-record outcomes and the
/// response returned to the invocation runtime.
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

// ========================================
// S3 event payload
// ========================================

/// Object-created notification delivered by S3
///
/// Only the `Records` array is checked up front. Each record is converted
/// when the batch reaches it, so a malformed record fails at its own
/// position and earlier records keep their effects.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3Event {
    /// Parse a raw runtime payload
    pub fn from_value(payload: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(payload)?)
    }

    /// Lazily convert each record into a change record
    pub fn into_change_records(self) -> impl Iterator<Item = Result<ChangeRecord>> + Send {
        self.records.into_iter().map(ChangeRecord::from_event_record)
    }
}

/// S3 event keys use form encoding: `+` for space, `%XX` escapes for the rest
///
/// Invalid UTF-8 sequences become U+FFFD instead of failing the record.
fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

// ========================================
// Processing models
// ========================================

/// One object-creation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub source_bucket: String,
    pub source_key: String,
}

impl ChangeRecord {
    pub fn new(source_bucket: impl Into<String>, source_key: impl Into<String>) -> Self {
        Self {
            source_bucket: source_bucket.into(),
            source_key: source_key.into(),
        }
    }

    /// Build from one raw entry of the event's `Records` array
    pub fn from_event_record(record: serde_json::Value) -> Result<Self> {
        let record: S3EventRecord = serde_json::from_value(record)?;
        Ok(Self {
            source_bucket: record.s3.bucket.name,
            source_key: decode_object_key(&record.s3.object.key),
        })
    }
}

/// Pixel dimensions, rendered as `WxH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result reported through a status notification
///
/// A success always names the record it came from and where the derivative
/// was written. A failure ends the whole batch and carries only the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success {
        source_bucket: String,
        source_key: String,
        destination_key: String,
        original_dimensions: Dimensions,
        resized_dimensions: Dimensions,
    },
    Failure {
        error_message: String,
    },
}

impl ProcessingOutcome {
    pub fn success(
        record: &ChangeRecord,
        destination_key: impl Into<String>,
        original_dimensions: Dimensions,
        resized_dimensions: Dimensions,
    ) -> Self {
        ProcessingOutcome::Success {
            source_bucket: record.source_bucket.clone(),
            source_key: record.source_key.clone(),
            destination_key: destination_key.into(),
            original_dimensions,
            resized_dimensions,
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        ProcessingOutcome::Failure {
            error_message: error_message.into(),
        }
    }
}

// ========================================
// Batch result and runtime response
// ========================================

/// Overall result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchResult {
    Completed { processed: usize, skipped: usize },
    Failed { error: String, status_code: u16 },
}

impl BatchResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchResult::Completed { .. })
    }

    pub fn into_response(self) -> HandlerResponse {
        match self {
            BatchResult::Completed { .. } => {
                HandlerResponse::new(200, "Image processing completed successfully!")
            }
            BatchResult::Failed { error, status_code } => {
                HandlerResponse::new(status_code, &format!("Error processing image: {error}"))
            }
        }
    }
}

/// Response handed back to the invocation runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded string
    pub body: String,
}

impl HandlerResponse {
    fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }
}
