/// Configuration management for image-resize-service
///
/// Loads configuration from environment variables. The destination bucket and
/// topic are required; the resize bounds fall back to 800x600.
use crate::error::{AppError, Result};
use crate::services::resize::ResizeTarget;

/// Default maximum output width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// Default maximum output height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 600;

#[derive(Clone, Debug)]
pub struct Config {
    /// Bucket receiving resized images
    pub destination_bucket: String,
    /// Topic receiving success/failure messages
    pub sns_topic_arn: String,
    pub resize: ResizeTarget,
    /// Custom S3 endpoint (LocalStack, MinIO)
    pub s3_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let destination_bucket = required_var("DESTINATION_BUCKET")?;
        let sns_topic_arn = required_var("SNS_TOPIC_ARN")?;

        Ok(Config {
            destination_bucket,
            sns_topic_arn,
            resize: resize_target_from_env()?,
            s3_endpoint: std::env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
        })
    }
}

/// Read RESIZE_WIDTH / RESIZE_HEIGHT, falling back to 800x600
pub fn resize_target_from_env() -> Result<ResizeTarget> {
    Ok(ResizeTarget {
        max_width: dimension_var("RESIZE_WIDTH", DEFAULT_MAX_WIDTH)?,
        max_height: dimension_var("RESIZE_HEIGHT", DEFAULT_MAX_HEIGHT)?,
    })
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{name} not set"))),
    }
}

fn dimension_var(name: &str, default: u32) -> Result<u32> {
    let raw = match std::env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{name}={raw:?} is not a valid dimension: {e}")))?;

    if value == 0 {
        return Err(AppError::Config(format!("{name} must be greater than zero")));
    }

    Ok(value)
}
