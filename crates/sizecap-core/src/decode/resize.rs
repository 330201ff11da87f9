//! Image resizing for the scale phase of the size search.
//!
//! All functions return new `ImageHandle` instances without modifying the input.

use super::{DecodeError, FilterType, ImageHandle};
use crate::decode::reader::into_handle;

/// Resize an image to exact dimensions.
///
/// The color mode of the input is preserved.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero-sized target and
/// `DecodeError::Corrupt` if the pixel buffer does not match the handle's
/// dimensions.
pub fn resize(
    image: &ImageHandle,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ImageHandle, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let source = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::Corrupt("Pixel buffer does not match dimensions".to_string()))?;

    let resized = source.resize_exact(width, height, filter.to_image_filter());

    Ok(into_handle(resized))
}

/// Dimensions of a `width` x `height` image scaled by `scale`.
///
/// Each side is rounded to the nearest integer and never drops below 1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scale_side = |side: u32| ((side as f64 * scale).round() as u32).max(1);
    (scale_side(width), scale_side(height))
}
