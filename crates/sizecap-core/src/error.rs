//! Top-level error type for reduction operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::search::PolicyError;

/// Errors produced while reducing images.
///
/// `InvalidBudget`, `InvalidPolicy` and `EmptyBatch` fail a whole call. The
/// remaining variants only ever describe one image and are turned into a
/// failed [`ReductionResult`](crate::ReductionResult) by the batch layer.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Budget is zero, negative or not a finite number.
    #[error("Max size must be a positive number of megabytes, got {0}")]
    InvalidBudget(f64),

    /// Search policy values are inconsistent.
    #[error("Invalid search policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    /// A batch call received no images.
    #[error("No images to process")]
    EmptyBatch,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reading a source or writing an output artifact failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReduceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;
