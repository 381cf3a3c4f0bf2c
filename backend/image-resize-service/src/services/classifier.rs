//! Image classification by object key extension

/// Extensions accepted for resizing, lower-case
const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];

/// Routing decision for an object key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Image,
    Skip,
}

/// Whether the key names a supported image, compared case-insensitively
pub fn is_supported(key: &str) -> bool {
    let key = key.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| key.ends_with(ext))
}

pub fn classify(key: &str) -> Classification {
    if is_supported(key) {
        Classification::Image
    } else {
        Classification::Skip
    }
}
