//! Event processor - runs a batch of change records through the pipeline
//!
//! For each record, in order:
//! 1. Skip keys that are not images
//! 2. Download the original from the source bucket
//! 3. Resize and re-encode
//! 4. Upload under `resized/` in the destination bucket, keeping the content
//!    type unless the image fell back to JPEG
//! 5. Publish a success notification
//!
//! The first error stops the batch, publishes a failure notification and
//! fails the invocation. Uploads made before the error are kept.

use super::classifier::{classify, Classification};
use super::notification::NotificationEmitter;
use super::resize::ResizeEngine;
use super::storage::ObjectStore;
use crate::error::{AppError, Result};
use crate::models::{BatchResult, ChangeRecord, ProcessingOutcome, S3Event};
use std::sync::Arc;
use tracing::{error, info};

/// Prefix applied to source keys in the destination bucket
pub const DESTINATION_PREFIX: &str = "resized/";

enum RecordOutcome {
    Skipped,
    Processed,
}

/// Orchestrates classify → fetch → resize → store → notify
pub struct EventProcessor {
    store: Arc<dyn ObjectStore>,
    engine: ResizeEngine,
    notifier: NotificationEmitter,
    destination_bucket: String,
}

impl EventProcessor {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        engine: ResizeEngine,
        notifier: NotificationEmitter,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            engine,
            notifier,
            destination_bucket: destination_bucket.into(),
        }
    }

    /// Process every record sequentially, stopping at the first error
    pub async fn process_batch(&self, records: &[ChangeRecord]) -> BatchResult {
        self.process_records(records.iter().cloned().map(Ok)).await
    }

    /// Process the records of an event, converting each one when reached
    pub async fn process_event(&self, event: S3Event) -> BatchResult {
        self.process_records(event.into_change_records()).await
    }

    /// Report an error that ended the invocation
    pub async fn fail(&self, err: &AppError) -> BatchResult {
        let error_message = err.to_string();
        error!(error = %error_message, "Error processing image");
        self.notifier.notify_failure(&error_message).await;
        BatchResult::Failed {
            error: error_message,
            status_code: err.status_code(),
        }
    }

    async fn process_records<I>(&self, records: I) -> BatchResult
    where
        I: IntoIterator<Item = Result<ChangeRecord>>,
    {
        match self.run_batch(records).await {
            Ok(result) => result,
            Err(e) => self.fail(&e).await,
        }
    }

    async fn run_batch<I>(&self, records: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = Result<ChangeRecord>>,
    {
        let mut processed = 0;
        let mut skipped = 0;

        for record in records {
            let record = record?;
            match self.process_record(&record).await? {
                RecordOutcome::Processed => processed += 1,
                RecordOutcome::Skipped => skipped += 1,
            }
        }

        info!(processed, skipped, "Batch completed");
        Ok(BatchResult::Completed { processed, skipped })
    }

    async fn process_record(&self, record: &ChangeRecord) -> Result<RecordOutcome> {
        info!(
            source_bucket = %record.source_bucket,
            source_key = %record.source_key,
            "Processing image"
        );

        if classify(&record.source_key) == Classification::Skip {
            info!(source_key = %record.source_key, "Skipping non-image file");
            return Ok(RecordOutcome::Skipped);
        }

        let original = self
            .store
            .get(&record.source_bucket, &record.source_key)
            .await?;

        let resized = self.engine.resize(&original.body)?;
        info!(
            original_size = %resized.original,
            resized_size = %resized.dimensions,
            "Image resized"
        );

        let destination_key = destination_key(&record.source_key);
        let content_type = resized.content_type(original.content_type.as_deref());
        self.store
            .put(
                &self.destination_bucket,
                &destination_key,
                resized.data,
                content_type,
            )
            .await?;

        info!(
            destination_bucket = %self.destination_bucket,
            destination_key = %destination_key,
            "Uploaded resized image"
        );

        let outcome = ProcessingOutcome::success(
            record,
            destination_key,
            resized.original,
            resized.dimensions,
        );
        self.notifier.notify_success(&outcome).await;

        Ok(RecordOutcome::Processed)
    }
}

pub fn destination_key(source_key: &str) -> String {
    format!("{DESTINATION_PREFIX}{source_key}")
}
