//! Still-image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, ImageHandle, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content, not from a file name. Images
/// with any alpha channel (RGBA, grayscale+alpha, palette with
/// transparency) come back as [`ColorMode::Rgba`](super::ColorMode::Rgba);
/// everything else as RGB.
///
/// # Errors
///
/// Returns `DecodeError::Unsupported` if the bytes are not a recognized
/// image format, `DecodeError::Corrupt` if decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<ImageHandle, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::Unsupported);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::Unsupported,
        other => DecodeError::Corrupt(other.to_string()),
    })?;

    Ok(into_handle(apply_orientation(img, orientation)))
}

/// Convert a decoded image into a handle, keeping alpha only when present.
pub(crate) fn into_handle(img: DynamicImage) -> ImageHandle {
    if img.color().has_alpha() {
        ImageHandle::from_rgba_image(img.into_rgba8())
    } else {
        ImageHandle::from_rgb_image(img.into_rgb8())
    }
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;
    use image::ImageFormat;

    fn encode_fixture(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_fixture(
            DynamicImage::ImageRgb8(image::RgbImage::new(16, 8)),
            ImageFormat::Jpeg,
        );
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.dimensions(), (16, 8));
        assert_eq!(img.color, ColorMode::Rgb);
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_decode_png_with_alpha_keeps_alpha() {
        let bytes = encode_fixture(
            DynamicImage::ImageRgba8(image::RgbaImage::new(4, 3)),
            ImageFormat::Png,
        );
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.color, ColorMode::Rgba);
        assert_eq!(img.pixels.len(), 4 * 3 * 4);
    }

    #[test]
    fn test_decode_grayscale_alpha_is_rgba() {
        let bytes = encode_fixture(
            DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(3, 3)),
            ImageFormat::Png,
        );
        assert_eq!(decode_image(&bytes).unwrap().color, ColorMode::Rgba);
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::Unsupported)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = encode_fixture(
            DynamicImage::ImageRgb8(image::RgbImage::new(32, 32)),
            ImageFormat::Jpeg,
        );
        let result = decode_image(&bytes[..bytes.len() / 3]);
        assert!(matches!(result, Err(DecodeError::Corrupt(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = encode_fixture(
            DynamicImage::ImageRgb8(image::RgbImage::new(2, 2)),
            ImageFormat::Jpeg,
        );
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap());

        let rotated = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap());

        let flipped = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
