//! Image Resize Service - Lambda entry point
//!
//! Receives S3 object-created events, writes resized copies to the destination
//! bucket and reports each outcome to SNS.
//!
//! Environment variables:
//! - DESTINATION_BUCKET: bucket receiving `resized/<key>` objects
//! - SNS_TOPIC_ARN: topic for success/failure notifications
//! - RESIZE_WIDTH: max output width (default: 800)
//! - RESIZE_HEIGHT: max output height (default: 600)
//! - S3_ENDPOINT: custom S3 endpoint, e.g. LocalStack (optional)
//! - RUST_LOG: log filter (default: info)

use image_resize_service::models::HandlerResponse;
use image_resize_service::services::{
    EventProcessor, NotificationEmitter, ResizeEngine, S3ObjectStore, SnsPublisher,
};
use image_resize_service::{handle_event, Config};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();

    let config = Config::from_env()?;
    info!(
        destination_bucket = %config.destination_bucket,
        max_width = config.resize.max_width,
        max_height = config.resize.max_height,
        "Configuration loaded"
    );

    let aws_config = aws_config::load_from_env().await;
    let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);
    if let Some(endpoint) = &config.s3_endpoint {
        s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
    }
    let store = Arc::new(S3ObjectStore::new(aws_sdk_s3::Client::from_conf(
        s3_config.build(),
    )));
    let publisher = Arc::new(SnsPublisher::new(aws_sdk_sns::Client::new(&aws_config)));

    let notifier = NotificationEmitter::new(
        publisher,
        config.sns_topic_arn.clone(),
        config.destination_bucket.clone(),
    );
    let processor = EventProcessor::new(
        store,
        ResizeEngine::new(config.resize),
        notifier,
        config.destination_bucket.clone(),
    );
    let processor = &processor;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<serde_json::Value>| async move {
            Ok::<HandlerResponse, Error>(handle_event(processor, event.payload).await)
        },
    ))
    .await
}
