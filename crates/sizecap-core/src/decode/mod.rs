//! Image decoding and pixel-level preparation.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, GIF, BMP, TIFF and WebP input
//! - Applying EXIF orientation so reported dimensions match what users see
//! - Flattening transparency onto white for the JPEG output
//! - Resizing for the scale phase of the size search
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use sizecap_core::decode::{decode_image, flatten_onto_white};
//!
//! let bytes = std::fs::read("logo.png").unwrap();
//! let image = flatten_onto_white(decode_image(&bytes).unwrap());
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod flatten;
mod reader;
mod resize;
mod types;

pub use flatten::flatten_onto_white;
pub use reader::decode_image;
pub use resize::{resize, scaled_dimensions};
pub use types::{ColorMode, DecodeError, FilterType, ImageHandle, Orientation};
