//! Local runner - pushes one image through the pipeline without AWS
//!
//! Copies the image into `<work-dir>/test-source-bucket/`, builds an S3
//! object-created event for it and invokes the same handler the Lambda runs.
//! Output lands in `<work-dir>/test-destination-bucket/resized/`, and
//! notifications are written to the log instead of SNS.
//!
//! Usage: resize-local <image-path> [work-dir]
//!
//! Environment variables:
//! - RESIZE_WIDTH / RESIZE_HEIGHT: bounds (default: 800x600)
//! - RUST_LOG: log filter (default: info)

use anyhow::{bail, Context, Result};
use image_resize_service::config::resize_target_from_env;
use image_resize_service::services::{
    EventProcessor, FsObjectStore, LogPublisher, NotificationEmitter, ResizeEngine,
};
use image_resize_service::handle_event;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const SOURCE_BUCKET: &str = "test-source-bucket";
const DESTINATION_BUCKET: &str = "test-destination-bucket";
const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:test-topic";

fn create_test_event(bucket: &str, key: &str, size: u64) -> serde_json::Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "test-config",
                "bucket": {
                    "name": bucket,
                    "arn": format!("arn:aws:s3:::{bucket}")
                },
                "object": {
                    "key": urlencoding::encode(key),
                    "size": size,
                    "eTag": "test-etag"
                }
            }
        }]
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next().map(PathBuf::from) else {
        bail!("usage: resize-local <image-path> [work-dir]");
    };
    let work_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("resize-local-out"));

    let key = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .context("image path has no usable file name")?
        .to_string();

    let size = stage_source(&image_path, &work_dir, &key).await?;
    let target = resize_target_from_env()?;

    let notifier = NotificationEmitter::new(Arc::new(LogPublisher), TOPIC, DESTINATION_BUCKET);
    let processor = EventProcessor::new(
        Arc::new(FsObjectStore::new(&work_dir)),
        ResizeEngine::new(target),
        notifier,
        DESTINATION_BUCKET,
    );

    let event = create_test_event(SOURCE_BUCKET, &key, size);
    info!(event = %event, "Invoking handler");

    let response = handle_event(&processor, event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.status_code != 200 {
        bail!("processing failed with status {}", response.status_code);
    }
    Ok(())
}

/// Copy the input image into the source bucket directory
async fn stage_source(image_path: &Path, work_dir: &Path, key: &str) -> Result<u64> {
    let bucket_dir = work_dir.join(SOURCE_BUCKET);
    tokio::fs::create_dir_all(&bucket_dir)
        .await
        .with_context(|| format!("failed to create {}", bucket_dir.display()))?;

    tokio::fs::copy(image_path, bucket_dir.join(key))
        .await
        .with_context(|| format!("failed to copy {}", image_path.display()))
}
