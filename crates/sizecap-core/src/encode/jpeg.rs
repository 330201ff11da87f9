//! JPEG encoding for reduced output.
//!
//! Uses the `image` crate's baseline JPEG encoder. The encoder is
//! deterministic: the same pixels at the same quality always produce the
//! same bytes, which the size search relies on.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{ColorMode, ImageHandle};

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG has no alpha channel; flatten first
    #[error("JPEG output cannot carry an alpha channel")]
    AlphaNotSupported,

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Encode an RGB [`ImageHandle`] to JPEG bytes.
///
/// # Errors
///
/// Returns `EncodeError::AlphaNotSupported` for RGBA handles; callers are
/// expected to composite them with
/// [`flatten_onto_white`](crate::decode::flatten_onto_white) first.
pub fn encode_handle(image: &ImageHandle, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match image.color {
        ColorMode::Rgb => encode_jpeg(&image.pixels, image.width, image.height, quality),
        ColorMode::Rgba => Err(EncodeError::AlphaNotSupported),
    }
}
