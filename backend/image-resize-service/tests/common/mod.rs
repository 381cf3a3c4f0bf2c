//! Shared fixtures for integration tests
//!
//! In-memory object store and publisher that record every call, plus helpers
//! for building encoded test images and processors.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
use image_resize_service::models::ChangeRecord;
use image_resize_service::services::{
    EventProcessor, NotificationEmitter, NotificationPublisher, ObjectStore, ResizeEngine,
    ResizeTarget, StoredObject,
};
use image_resize_service::{AppError, Result};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

pub const SOURCE_BUCKET: &str = "test-source-bucket";
pub const DESTINATION_BUCKET: &str = "test-destination-bucket";
pub const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:test-topic";

#[derive(Debug, Clone)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// Object store backed by a HashMap, with injectable failures
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    gets: Mutex<Vec<(String, String)>>,
    puts: Mutex<Vec<PutCall>>,
    failing_gets: Mutex<HashSet<String>>,
    fail_puts: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: Bytes::from(body),
                content_type: Some(content_type.to_string()),
            },
        );
    }

    /// Make `get` fail for this key even if the object exists
    pub fn fail_get(&self, key: &str) {
        self.failing_gets.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_puts(&self) {
        *self.fail_puts.lock().unwrap() = true;
    }

    pub fn gets(&self) -> Vec<(String, String)> {
        self.gets.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        self.gets
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));

        let fetch_error = |message: &str| AppError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.failing_gets.lock().unwrap().contains(key) {
            return Err(fetch_error("Access Denied"));
        }

        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| fetch_error("NoSuchKey"))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        if *self.fail_puts.lock().unwrap() {
            return Err(AppError::Store {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "SlowDown".to_string(),
            });
        }

        self.puts.lock().unwrap().push(PutCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.map(str::to_string),
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Published {
    pub topic: String,
    pub subject: String,
    pub message: serde_json::Value,
}

/// Publisher that records messages, optionally failing every call
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Published>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<()> {
        if self.fail {
            return Err(AppError::Notify("topic does not exist".to_string()));
        }

        let message = serde_json::from_str(message)
            .map_err(|e| AppError::Notify(format!("message is not JSON: {e}")))?;
        self.published.lock().unwrap().push(Published {
            topic: topic.to_string(),
            subject: subject.to_string(),
            message,
        });
        Ok(())
    }
}

pub fn processor(store: Arc<MemoryStore>, publisher: Arc<RecordingPublisher>) -> EventProcessor {
    let notifier = NotificationEmitter::new(publisher, TOPIC, DESTINATION_BUCKET);
    EventProcessor::new(
        store,
        ResizeEngine::new(ResizeTarget {
            max_width: 800,
            max_height: 600,
        }),
        notifier,
        DESTINATION_BUCKET,
    )
}

pub fn record(key: &str) -> ChangeRecord {
    ChangeRecord::new(SOURCE_BUCKET, key)
}

pub fn s3_event(keys: &[&str]) -> serde_json::Value {
    let records: Vec<_> = keys
        .iter()
        .map(|key| {
            serde_json::json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": SOURCE_BUCKET },
                    "object": { "key": key, "size": 1024 }
                }
            })
        })
        .collect();
    serde_json::json!({ "Records": records })
}

fn encode(img: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("fixture should encode");
    buf
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 251) as u8, 96])
    });
    encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Jpeg(90))
}

pub fn webp(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 199) as u8, 40, (y % 199) as u8])
    });
    encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::WebP)
}

/// Binary PPM, a format that decodes but is never written back
pub fn ppm(width: u32, height: u32) -> Vec<u8> {
    let mut data = format!("P6\n{width} {height}\n255\n").into_bytes();
    data.resize(data.len() + (width * height * 3) as usize, 120);
    data
}

pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 10, 0]));
    encode(DynamicImage::ImageRgba8(img), ImageOutputFormat::Png)
}
