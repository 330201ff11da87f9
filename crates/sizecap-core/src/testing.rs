//! Shared fixtures for unit tests.

use crate::codec::Codec;
use crate::decode::{ColorMode, DecodeError, FilterType, ImageHandle};
use crate::encode::EncodeError;

/// Codec whose output length is exactly `width * height * quality`.
///
/// "Files" it can decode are `b"SYN"` followed by width and height as
/// little-endian u16; anything else is reported as unsupported.
pub(crate) struct SyntheticCodec;

impl SyntheticCodec {
    pub(crate) fn image(width: u32, height: u32) -> ImageHandle {
        let len = width as usize * height as usize * 3;
        ImageHandle::new(width, height, ColorMode::Rgb, vec![0u8; len])
    }

    pub(crate) fn file(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = b"SYN".to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes
    }
}

impl Codec for SyntheticCodec {
    fn decode(&self, bytes: &[u8]) -> Result<ImageHandle, DecodeError> {
        match bytes {
            [b'S', b'Y', b'N', w0, w1, h0, h1] => {
                let width = u16::from_le_bytes([*w0, *w1]) as u32;
                let height = u16::from_le_bytes([*h0, *h1]) as u32;
                Ok(Self::image(width, height))
            }
            [b'S', b'Y', b'N', ..] => Err(DecodeError::Corrupt("short header".to_string())),
            _ => Err(DecodeError::Unsupported),
        }
    }

    fn resize(
        &self,
        _image: &ImageHandle,
        width: u32,
        height: u32,
        _filter: FilterType,
    ) -> Result<ImageHandle, DecodeError> {
        Ok(Self::image(width, height))
    }

    fn encode(&self, image: &ImageHandle, quality: u8) -> Result<Vec<u8>, EncodeError> {
        if image.is_empty() {
            return Err(EncodeError::InvalidDimensions {
                width: image.width,
                height: image.height,
            });
        }
        let len = image.width as usize * image.height as usize * quality as usize;
        Ok(vec![quality; len])
    }
}

/// Deterministic RGB noise; compresses badly at any quality.
pub(crate) fn noise_image(width: u32, height: u32) -> ImageHandle {
    let mut state = 0x2545_f491_u32;
    let pixels = (0..width as usize * height as usize * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    ImageHandle::new(width, height, ColorMode::Rgb, pixels)
}

/// `noise_image` written out as a PNG file.
pub(crate) fn png_file(width: u32, height: u32) -> Vec<u8> {
    let handle = noise_image(width, height);
    let mut buf = std::io::Cursor::new(Vec::new());
    handle
        .to_dynamic()
        .unwrap()
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
