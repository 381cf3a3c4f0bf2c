/// SNS notification publisher
use super::NotificationPublisher;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client as SnsClient;
use tracing::debug;

#[derive(Clone)]
pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<()> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| AppError::Notify(DisplayErrorContext(&e).to_string()))?;

        debug!(
            topic = %topic,
            message_id = ?output.message_id(),
            "Published to SNS"
        );
        Ok(())
    }
}
