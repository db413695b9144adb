//! Photo attachment rules shared by the submit endpoint and the SDK.

use thiserror::Error;

use crate::shared::constants::{ALLOWED_MEDIA_TYPES, MAX_MEDIA_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Image must be 10MB or smaller")]
    TooLarge,
    #[error("Only JPEG, PNG and GIF images are allowed (got '{0}')")]
    UnsupportedType(String),
}

/// File extension for an accepted image type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Check size and type of a photo; returns the extension to store it under
pub fn validate_image(content_type: &str, size: usize) -> Result<&'static str, MediaError> {
    if size > MAX_MEDIA_SIZE {
        return Err(MediaError::TooLarge);
    }

    let content_type = content_type.trim().to_ascii_lowercase();
    if !ALLOWED_MEDIA_TYPES.contains(&content_type.as_str()) {
        return Err(MediaError::UnsupportedType(content_type));
    }

    extension_for(&content_type).ok_or(MediaError::UnsupportedType(content_type))
}
