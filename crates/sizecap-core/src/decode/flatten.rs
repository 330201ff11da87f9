//! Alpha removal for output formats without transparency.

use super::{ColorMode, ImageHandle};

/// Composite an RGBA image over solid white and return an RGB image.
///
/// RGB input is returned unchanged. Straight alpha is assumed, so each
/// channel becomes `c * a + 255 * (1 - a)`.
pub fn flatten_onto_white(image: ImageHandle) -> ImageHandle {
    if !image.has_alpha() {
        return image;
    }

    let pixels = image
        .pixels
        .chunks_exact(4)
        .flat_map(|px| {
            let alpha = px[3] as u32;
            let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
            [blend(px[0]), blend(px[1]), blend(px[2])]
        })
        .collect();

    ImageHandle::new(image.width, image.height, ColorMode::Rgb, pixels)
}
