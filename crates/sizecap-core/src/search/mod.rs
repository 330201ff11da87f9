//! Target-size encoding search.
//!
//! Given a decoded image and a byte budget, [`search_encoding`] picks a
//! (quality, scale) pair whose JPEG encoding fits the budget. The step
//! constants live in [`SearchPolicy`] so the strategy can be tuned without
//! touching the batch layer.

mod greedy;
mod policy;

pub use greedy::{search_encoding, SearchOutcome};
pub use policy::{
    PolicyError, SearchPolicy, DEFAULT_INITIAL_QUALITY, DEFAULT_MIN_QUALITY, DEFAULT_MIN_SCALE,
    DEFAULT_QUALITY_STEP, DEFAULT_SCALE_STEP,
};
