//! The codec seam used by the size search.
//!
//! The search never touches an image library directly; it only decodes,
//! resizes and encodes through a [`Codec`]. [`JpegCodec`] is the
//! production implementation backed by the `image` crate.

use crate::decode::{self, DecodeError, FilterType, ImageHandle};
use crate::encode::{self, EncodeError};

/// Decode, resize and encode capabilities consumed by the reducer.
///
/// `encode` must be deterministic: identical handles at identical quality
/// produce identical bytes.
pub trait Codec: Sync {
    /// Decode raw file bytes into a handle.
    fn decode(&self, bytes: &[u8]) -> Result<ImageHandle, DecodeError>;

    /// Resize to exact pixel dimensions.
    fn resize(
        &self,
        image: &ImageHandle,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<ImageHandle, DecodeError>;

    /// Encode an RGB handle at the given quality (1-100).
    fn encode(&self, image: &ImageHandle, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

/// JPEG output codec over the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl Codec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<ImageHandle, DecodeError> {
        decode::decode_image(bytes)
    }

    fn resize(
        &self,
        image: &ImageHandle,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<ImageHandle, DecodeError> {
        decode::resize(image, width, height, filter)
    }

    fn encode(&self, image: &ImageHandle, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode::encode_handle(image, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;

    #[test]
    fn test_jpeg_codec_round_trip_dimensions() {
        let codec = JpegCodec;
        let img = ImageHandle::new(20, 10, ColorMode::Rgb, vec![90u8; 20 * 10 * 3]);

        let small = codec.resize(&img, 10, 5, FilterType::Lanczos3).unwrap();
        let bytes = codec.encode(&small, 80).unwrap();
        let decoded = codec.decode(&bytes).unwrap();

        assert_eq!(decoded.dimensions(), (10, 5));
    }
}
