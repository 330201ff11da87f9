//! Image encoding for reduced output.
//!
//! Output is always baseline JPEG with a configurable quality.
//!
//! # Examples
//!
//! ```ignore
//! use sizecap_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_handle, encode_jpeg, EncodeError};
