//! Status notifications
//!
//! `NotificationEmitter` renders success/failure messages and hands them to a
//! `NotificationPublisher`. Publishing is best-effort: errors are logged and
//! never returned to the pipeline.

pub mod sns;

pub use sns::SnsPublisher;

use crate::error::Result;
use crate::models::ProcessingOutcome;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

pub const SUCCESS_SUBJECT: &str = "Image Processing Success";
pub const FAILURE_SUBJECT: &str = "Image Processing Failed";

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish `message` to `topic`; failures are `AppError::Notify`
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<()>;
}

/// Publisher that only logs, for local runs without a topic
#[derive(Clone, Copy, Debug, Default)]
pub struct LogPublisher;

#[async_trait]
impl NotificationPublisher for LogPublisher {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<()> {
        info!(topic = %topic, subject = %subject, message = %message, "Notification");
        Ok(())
    }
}

/// Wire format of a status message
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
enum NotificationMessage<'a> {
    Success {
        source_bucket: &'a str,
        source_key: &'a str,
        destination_bucket: &'a str,
        destination_key: &'a str,
        original_size: String,
        resized_size: String,
    },
    Failure {
        error: &'a str,
    },
}

impl<'a> NotificationMessage<'a> {
    fn from_outcome(outcome: &'a ProcessingOutcome, destination_bucket: &'a str) -> Self {
        match outcome {
            ProcessingOutcome::Success {
                source_bucket,
                source_key,
                destination_key,
                original_dimensions,
                resized_dimensions,
            } => NotificationMessage::Success {
                source_bucket,
                source_key,
                destination_bucket,
                destination_key,
                original_size: original_dimensions.to_string(),
                resized_size: resized_dimensions.to_string(),
            },
            ProcessingOutcome::Failure { error_message } => NotificationMessage::Failure {
                error: error_message,
            },
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            NotificationMessage::Success { .. } => SUCCESS_SUBJECT,
            NotificationMessage::Failure { .. } => FAILURE_SUBJECT,
        }
    }
}

/// Formats and publishes outcome messages to a single topic
#[derive(Clone)]
pub struct NotificationEmitter {
    publisher: Arc<dyn NotificationPublisher>,
    topic: String,
    destination_bucket: String,
}

impl NotificationEmitter {
    pub fn new(
        publisher: Arc<dyn NotificationPublisher>,
        topic: impl Into<String>,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            destination_bucket: destination_bucket.into(),
        }
    }

    pub async fn notify_success(&self, outcome: &ProcessingOutcome) {
        self.send(outcome).await;
    }

    pub async fn notify_failure(&self, error_message: &str) {
        self.send(&ProcessingOutcome::failure(error_message)).await;
    }

    async fn send(&self, outcome: &ProcessingOutcome) {
        let message = NotificationMessage::from_outcome(outcome, &self.destination_bucket);
        let subject = message.subject();

        let body = match serde_json::to_string_pretty(&message) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to serialize notification");
                return;
            }
        };

        match self.publisher.publish(&self.topic, subject, &body).await {
            Ok(()) => info!(subject = %subject, "Notification sent"),
            Err(e) => error!(subject = %subject, error = %e, "Failed to send notification"),
        }
    }
}
