//! Size budget expressed in megabytes and compared in bytes.

use crate::error::ReduceError;

/// Bytes per megabyte (binary megabytes, 1024 * 1024).
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert a byte count to megabytes without rounding.
pub fn bytes_to_mb(bytes: usize) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Maximum output size for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBudget {
    mb: f64,
    bytes: usize,
}

impl SizeBudget {
    /// Build a budget from megabytes.
    ///
    /// # Errors
    ///
    /// `ReduceError::InvalidBudget` for zero, negative, NaN or infinite input.
    pub fn from_mb(mb: f64) -> Result<Self, ReduceError> {
        if !mb.is_finite() || mb <= 0.0 {
            return Err(ReduceError::InvalidBudget(mb));
        }
        Ok(Self {
            mb,
            bytes: (mb * BYTES_PER_MB) as usize,
        })
    }

    /// Budget as requested, in megabytes.
    pub fn mb(&self) -> f64 {
        self.mb
    }

    /// Budget in bytes (`floor(mb * 1024 * 1024)`).
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Whether `len` bytes fit within the budget.
    pub fn fits(&self, len: usize) -> bool {
        len <= self.bytes
    }
}
