//! sizecap core - target-size image reduction
//!
//! This crate shrinks images until their JPEG encoding fits a byte budget.
//! [`search`] holds the quality/scale search, [`batch`] runs it across many
//! images and turns per-image failures into data, and [`decode`] /
//! [`encode`] wrap the `image` crate behind the [`Codec`] seam.
//!
//! ```ignore
//! use sizecap_core::reduce_many;
//!
//! let results = reduce_many(vec![(std::fs::read("a.png")?, "a.png")], 1.0)?;
//! for result in &results {
//!     match result.report() {
//!         Some(r) => println!("{}: {:.2}MB", result.original_filename, r.final_size_mb),
//!         None => println!("{}: {}", result.original_filename, result.error().unwrap_or("")),
//!     }
//! }
//! ```

pub mod batch;
pub mod budget;
pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod naming;
pub mod result;
pub mod search;

#[cfg(test)]
mod testing;

pub use batch::{reduce_many, reduce_one, ImageSource, OutputTarget, Reducer};
pub use budget::{bytes_to_mb, SizeBudget, BYTES_PER_MB};
pub use codec::{Codec, JpegCodec};
pub use error::{ReduceError, Result};
pub use naming::{is_supported_file_name, output_file_name, unique_output_file_names};
pub use result::{Dimensions, ReducedOutput, ReductionOutcome, ReductionReport, ReductionResult};
pub use search::{search_encoding, SearchOutcome, SearchPolicy};
