//! Resize engine
//!
//! Turns an uploaded image into a bounded-size derivative:
//! - decode and detect the source format
//! - flatten alpha onto white and normalize to 8-bit gray/RGB
//! - downscale with Lanczos3, never upscale
//! - re-encode in the source format (JPEG at quality 85, WebP lossless)

pub mod processor;

pub use processor::{
    target_dimensions, ImageBuffer, ResizeEngine, TransformError, FALLBACK_CONTENT_TYPE, JPEG_QUALITY,
};

use crate::config::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

/// Bounding box for resized images
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeTarget {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ResizeTarget {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}
