//! sizecap WASM - WebAssembly bindings for sizecap
//!
//! This crate exposes the sizecap-core reducer to the upload page.
//!
//! # Module Structure
//!
//! - `reduce` - single-image and batch reduction entry points
//! - `types` - `JsReduction`, the per-image result handed back to JavaScript
//!
//! # Usage
//!
//! ```typescript
//! import init, { is_supported_file_name, reduce_image } from '@sizecap/wasm';
//!
//! await init();
//!
//! if (is_supported_file_name(file.name)) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const result = reduce_image(bytes, file.name, 1.0);
//!   if (result.succeeded) {
//!     const blob = new Blob([result.output_bytes()], { type: 'image/jpeg' });
//!   } else {
//!     console.warn(result.error);
//!   }
//! }
//! ```

use wasm_bindgen::prelude::*;

mod reduce;
mod types;

pub use reduce::{reduce_image, reduce_images};
pub use types::JsReduction;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Whether a file picked in the browser should be sent to the reducer.
///
/// Accepts png, jpg, jpeg, gif, bmp, tiff and webp, case-insensitively.
#[wasm_bindgen]
pub fn is_supported_file_name(name: &str) -> bool {
    sizecap_core::is_supported_file_name(name)
}

/// Download name used for the reduced version of `name`.
#[wasm_bindgen]
pub fn output_file_name(name: &str) -> String {
    sizecap_core::output_file_name(name)
}
