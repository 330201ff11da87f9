//! Tunable constants of the quality/scale search.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Quality of the first attempt.
pub const DEFAULT_INITIAL_QUALITY: u8 = 95;
/// Quality decrement between attempts.
pub const DEFAULT_QUALITY_STEP: u8 = 5;
/// Lowest quality tried; also the quality used while scaling.
pub const DEFAULT_MIN_QUALITY: u8 = 5;
/// Multiplier applied to the scale on each scaling attempt.
pub const DEFAULT_SCALE_STEP: f64 = 0.9;
/// Scaling stops once the scale is at or below this value.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Rejected policy values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("quality {0} is outside 1-100")]
    QualityOutOfRange(u8),

    #[error("min_quality ({min}) exceeds initial_quality ({initial})")]
    QualityBoundsInverted { min: u8, initial: u8 },

    #[error("quality_step must be at least 1")]
    ZeroQualityStep,

    #[error("scale_step must be in (0, 1), got {0}")]
    ScaleStepOutOfRange(f64),

    #[error("min_scale must be in (0, 1), got {0}")]
    MinScaleOutOfRange(f64),
}

/// Search parameters.
///
/// Deserializes from a partial object; missing fields take the defaults
/// (95 / 5 / 5 / 0.9 / 0.1, Lanczos3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub initial_quality: u8,
    pub quality_step: u8,
    pub min_quality: u8,
    pub scale_step: f64,
    pub min_scale: f64,
    /// Resampling filter for the scale phase.
    pub filter: FilterType,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            initial_quality: DEFAULT_INITIAL_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
            scale_step: DEFAULT_SCALE_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            filter: FilterType::Lanczos3,
        }
    }
}

impl SearchPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the search bounded by this policy terminates and stays
    /// inside valid encoder settings.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for quality in [self.initial_quality, self.min_quality] {
            if !(1..=100).contains(&quality) {
                return Err(PolicyError::QualityOutOfRange(quality));
            }
        }
        if self.min_quality > self.initial_quality {
            return Err(PolicyError::QualityBoundsInverted {
                min: self.min_quality,
                initial: self.initial_quality,
            });
        }
        if self.quality_step == 0 {
            return Err(PolicyError::ZeroQualityStep);
        }
        // NaN fails both comparisons
        if !(self.scale_step > 0.0 && self.scale_step < 1.0) {
            return Err(PolicyError::ScaleStepOutOfRange(self.scale_step));
        }
        if !(self.min_scale > 0.0 && self.min_scale < 1.0) {
            return Err(PolicyError::MinScaleOutOfRange(self.min_scale));
        }
        Ok(())
    }

    /// Qualities tried by the quality phase, highest first, floor included.
    pub fn quality_ladder(&self) -> impl Iterator<Item = u8> {
        let min = self.min_quality;
        let step = self.quality_step.max(1);
        let mut next = Some(self.initial_quality);
        std::iter::from_fn(move || {
            let current = next?;
            next = (current > min).then(|| current.saturating_sub(step).max(min));
            Some(current)
        })
    }

    /// Scales tried by the scale phase, largest first.
    pub fn scale_ladder(&self) -> impl Iterator<Item = f64> {
        let (step, min) = (self.scale_step, self.min_scale);
        let mut scale = 1.0_f64;
        std::iter::from_fn(move || {
            if scale <= min {
                return None;
            }
            scale *= step;
            Some(scale)
        })
    }
}
