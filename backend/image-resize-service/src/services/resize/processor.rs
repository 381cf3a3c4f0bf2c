//! Resize processor - derives bounded-size images from uploaded originals
//!
//! Decodes the original, normalizes its color mode so every encoder accepts it,
//! shrinks it to fit the configured box while keeping the aspect ratio, and
//! encodes it again in the format it arrived in.

use super::ResizeTarget;
use crate::models::Dimensions;
use bytes::Bytes;
use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::{
    ColorType, DynamicImage, GenericImageView, ImageError, ImageFormat, ImageOutputFormat, Rgb,
    RgbImage, Rgba,
};
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, warn};

/// Quality used for lossy output formats (0-100)
pub const JPEG_QUALITY: u8 = 85;

/// Format used when the source format is unknown or has no encoder
const DEFAULT_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Content type of fallback output
pub const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// Errors raised while turning the original bytes into the derivative
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Failed to encode {format:?} image: {source}")]
    Encode {
        format: ImageFormat,
        #[source]
        source: ImageError,
    },
}

/// Re-encoded image produced for one record
#[derive(Debug)]
pub struct ImageBuffer {
    /// Encoded bytes, ready to upload
    pub data: Bytes,
    /// Dimensions of the decoded original
    pub original: Dimensions,
    /// Dimensions of the encoded output
    pub dimensions: Dimensions,
    /// Color mode after normalization
    pub color: ColorType,
    /// Format the output was encoded in
    pub format: ImageFormat,
    /// Set when the source format has no encoder and the output fell back to JPEG
    pub transcoded: bool,
}

impl ImageBuffer {
    /// Content type to store the output under
    ///
    /// The source content type is kept unless the output was transcoded.
    pub fn content_type<'a>(&self, source: Option<&'a str>) -> Option<&'a str> {
        if self.transcoded {
            Some(FALLBACK_CONTENT_TYPE)
        } else {
            source
        }
    }
}

/// Resize engine
pub struct ResizeEngine {
    target: ResizeTarget,
    quality: u8,
}

impl ResizeEngine {
    /// Create an engine for the given bounding box
    pub fn new(target: ResizeTarget) -> Self {
        Self {
            target,
            quality: JPEG_QUALITY,
        }
    }

    /// Create an engine with the default 800x600 box
    pub fn with_defaults() -> Self {
        Self::new(ResizeTarget::default())
    }

    /// Produce the bounded-size derivative of `original_data`
    ///
    /// CPU-bound; callers process one image at a time.
    pub fn resize(&self, original_data: &[u8]) -> Result<ImageBuffer, TransformError> {
        let (img, source_format) = decode(original_data)?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            color = ?img.color(),
            format = ?source_format,
            "Decoded image"
        );

        let img = normalize_color(img);
        let (new_w, new_h) = target_dimensions(orig_w, orig_h, self.target);

        let resized = if (new_w, new_h) == (orig_w, orig_h) {
            debug!("Image already within bounds, keeping original dimensions");
            img
        } else {
            img.resize_exact(new_w, new_h, FilterType::Lanczos3)
        };

        let (format, output) = self.output_format(source_format);
        let transcoded = source_format != Some(format);
        let data = encode(&resized, format, output)?;

        debug!(
            width = new_w,
            height = new_h,
            format = ?format,
            size = data.len(),
            "Image re-encoded"
        );

        Ok(ImageBuffer {
            data,
            original: Dimensions::new(orig_w, orig_h),
            dimensions: Dimensions::new(new_w, new_h),
            color: resized.color(),
            format,
            transcoded,
        })
    }

    /// Pick the encoder for the source format, falling back to JPEG
    fn output_format(&self, source: Option<ImageFormat>) -> (ImageFormat, ImageOutputFormat) {
        let format = source.unwrap_or(DEFAULT_FORMAT);
        let output = match format {
            ImageFormat::Jpeg => Some(ImageOutputFormat::Jpeg(self.quality)),
            ImageFormat::Png => Some(ImageOutputFormat::Png),
            ImageFormat::Gif => Some(ImageOutputFormat::Gif),
            ImageFormat::Bmp => Some(ImageOutputFormat::Bmp),
            ImageFormat::Tiff => Some(ImageOutputFormat::Tiff),
            // lossless only
            ImageFormat::WebP => Some(ImageOutputFormat::WebP),
            _ => None,
        };

        match output {
            Some(output) => (format, output),
            None => {
                warn!(
                    source_format = ?format,
                    "No encoder for source format, falling back to JPEG"
                );
                (DEFAULT_FORMAT, ImageOutputFormat::Jpeg(self.quality))
            }
        }
    }
}

/// Compute output dimensions for an image of `width` x `height`
///
/// Images inside the box are returned as-is. Otherwise one side is pinned to
/// its maximum and the other is derived from the aspect ratio and floored.
/// Landscape means `aspect > 1`; a square image takes the height-pinned branch.
/// A derived side that floors to zero is clamped to one pixel.
pub fn target_dimensions(width: u32, height: u32, target: ResizeTarget) -> (u32, u32) {
    if width <= target.max_width && height <= target.max_height {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;

    if aspect > 1.0 {
        let new_height = (target.max_width as f64 / aspect).floor() as u32;
        (target.max_width, new_height.max(1))
    } else {
        let new_width = (target.max_height as f64 * aspect).floor() as u32;
        (new_width.max(1), target.max_height)
    }
}

fn decode(data: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>), TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(ImageError::IoError(e)))?;
    let format = reader.format();
    let img = reader.decode().map_err(TransformError::Decode)?;
    Ok((img, format))
}

/// Normalize to 8-bit gray or RGB; alpha is composited over white
fn normalize_color(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        color if color.has_alpha() => DynamicImage::ImageRgb8(flatten_onto_white(&img)),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    output: ImageOutputFormat,
) -> Result<Bytes, TransformError> {
    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);

    img.write_to(&mut cursor, output)
        .map_err(|source| TransformError::Encode { format, source })?;

    Ok(Bytes::from(buf))
}
