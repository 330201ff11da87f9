//! Two-phase greedy search: lower quality first, then shrink dimensions.

use tracing::{debug, warn};

use super::SearchPolicy;
use crate::budget::SizeBudget;
use crate::codec::Codec;
use crate::decode::{flatten_onto_white, scaled_dimensions, ImageHandle};
use crate::error::Result;

/// The encoding chosen by [`search_encoding`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Encoded output.
    pub bytes: Vec<u8>,
    /// Quality of the returned encoding.
    pub quality: u8,
    /// Scale applied to both sides; 1.0 when no resize happened.
    pub scale: f64,
    /// Pixel dimensions of the returned encoding.
    pub dimensions: (u32, u32),
    /// Whether `bytes` fits the budget. `false` means the floor of both
    /// phases was reached and this is the smallest attempt.
    pub within_budget: bool,
    /// Number of encode calls made.
    pub attempts: usize,
}

/// Find an encoding of `image` that fits `budget`.
///
/// Phase one walks the policy's quality ladder at full size and stops at
/// the first encoding that fits. If none does, phase two holds quality at
/// the floor and walks the scale ladder, resizing the source each step.
/// The most recent attempt is always the answer; the search never steps
/// back up. An alpha channel is composited onto white once, up front.
///
/// Fails when `policy` does not validate or the codec fails. An unreachable
/// budget yields the last attempt with `within_budget == false`.
pub fn search_encoding<C: Codec + ?Sized>(
    codec: &C,
    image: ImageHandle,
    budget: &SizeBudget,
    policy: &SearchPolicy,
) -> Result<SearchOutcome> {
    policy.validate()?;
    let source = flatten_onto_white(image);
    let full_size = source.dimensions();
    let mut attempts = 0;

    let mut last = None;
    for quality in policy.quality_ladder() {
        let bytes = codec.encode(&source, quality)?;
        attempts += 1;
        debug!(quality, scale = 1.0, size = bytes.len(), "encoding attempt");

        if budget.fits(bytes.len()) {
            return Ok(SearchOutcome {
                bytes,
                quality,
                scale: 1.0,
                dimensions: full_size,
                within_budget: true,
                attempts,
            });
        }
        last = Some((bytes, quality));
    }

    // The ladder always yields at least the initial quality.
    let (mut bytes, quality) = match last {
        Some(attempt) => attempt,
        None => (codec.encode(&source, policy.min_quality)?, policy.min_quality),
    };
    let mut scale = 1.0;
    let mut dimensions = full_size;

    for next_scale in policy.scale_ladder() {
        let (width, height) = scaled_dimensions(full_size.0, full_size.1, next_scale);
        let resized = codec.resize(&source, width, height, policy.filter)?;
        bytes = codec.encode(&resized, quality)?;
        attempts += 1;
        scale = next_scale;
        dimensions = (width, height);
        debug!(quality, scale, width, height, size = bytes.len(), "encoding attempt");

        if budget.fits(bytes.len()) {
            break;
        }
    }

    let within_budget = budget.fits(bytes.len());
    if !within_budget {
        warn!(
            size = bytes.len(),
            budget = budget.bytes(),
            "budget unattainable at minimum quality and scale"
        );
    }

    Ok(SearchOutcome {
        bytes,
        quality,
        scale,
        dimensions,
        within_budget,
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JpegCodec;
    use crate::decode::ColorMode;
    use crate::error::ReduceError;
    use crate::search::PolicyError;
    use crate::testing::{noise_image, SyntheticCodec};

    fn budget_bytes(bytes: usize) -> SizeBudget {
        SizeBudget::from_mb(bytes as f64 / crate::budget::BYTES_PER_MB).unwrap()
    }

    #[test]
    fn test_invalid_policy_is_rejected_before_encoding() {
        let codec = SyntheticCodec;
        let steady = SearchPolicy {
            scale_step: 1.0,
            ..SearchPolicy::new()
        };
        let result =
            search_encoding(&codec, SyntheticCodec::image(10, 10), &budget_bytes(1), &steady);
        assert!(matches!(
            result,
            Err(ReduceError::InvalidPolicy(PolicyError::ScaleStepOutOfRange(_)))
        ));

        let no_floor = SearchPolicy {
            min_scale: 0.0,
            ..SearchPolicy::new()
        };
        let result =
            search_encoding(&codec, SyntheticCodec::image(10, 10), &budget_bytes(1), &no_floor);
        assert!(matches!(
            result,
            Err(ReduceError::InvalidPolicy(PolicyError::MinScaleOutOfRange(_)))
        ));

        let nan_step = SearchPolicy {
            scale_step: f64::NAN,
            ..SearchPolicy::new()
        };
        assert!(
            search_encoding(&codec, SyntheticCodec::image(10, 10), &budget_bytes(1), &nan_step)
                .is_err()
        );
    }

    #[test]
    fn test_generous_budget_keeps_initial_quality() {
        let codec = SyntheticCodec;
        let img = SyntheticCodec::image(100, 100);

        let out =
            search_encoding(&codec, img, &SizeBudget::from_mb(10.0).unwrap(), &SearchPolicy::new())
                .unwrap();

        assert_eq!(out.quality, 95);
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.dimensions, (100, 100));
        assert!(out.within_budget);
        assert_eq!(out.attempts, 1);
    }

    #[test]
    fn test_quality_phase_stops_at_first_fit() {
        // 100x100 => 10_000 * q bytes; 500_000 first fits at q = 50
        let codec = SyntheticCodec;
        let out = search_encoding(
            &codec,
            SyntheticCodec::image(100, 100),
            &budget_bytes(500_000),
            &SearchPolicy::new(),
        )
        .unwrap();

        assert_eq!(out.quality, 50);
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.bytes.len(), 500_000);
        assert_eq!(out.attempts, 10);
    }

    #[test]
    fn test_scale_phase_holds_min_quality() {
        // at q = 5 full size is 50_000 bytes; 0.81 scale => 81*81*5 = 32_805
        let codec = SyntheticCodec;
        let out = search_encoding(
            &codec,
            SyntheticCodec::image(100, 100),
            &budget_bytes(40_000),
            &SearchPolicy::new(),
        )
        .unwrap();

        assert_eq!(out.quality, 5);
        assert!((out.scale - 0.81).abs() < 1e-9);
        assert_eq!(out.dimensions, (81, 81));
        assert!(out.within_budget);
        assert_eq!(out.attempts, 19 + 2);
    }

    #[test]
    fn test_unattainable_budget_returns_smallest_attempt() {
        let codec = SyntheticCodec;
        let policy = SearchPolicy::new();
        let out = search_encoding(
            &codec,
            SyntheticCodec::image(100, 100),
            &budget_bytes(1),
            &policy,
        )
        .unwrap();

        let scales = policy.scale_ladder().count();
        assert!(!out.within_budget);
        assert_eq!(out.quality, 5);
        assert!(out.scale > 0.0 && out.scale <= 0.1);
        assert_eq!(out.dimensions, (10, 10));
        assert_eq!(out.attempts, 19 + scales);
    }

    #[test]
    fn test_tiny_image_floors_at_one_pixel() {
        let codec = SyntheticCodec;
        let out = search_encoding(
            &codec,
            SyntheticCodec::image(3, 2),
            &budget_bytes(1),
            &SearchPolicy::new(),
        )
        .unwrap();

        assert_eq!(out.dimensions, (1, 1));
        assert!(!out.within_budget);
    }

    #[test]
    fn test_alpha_is_flattened_before_encoding() {
        let codec = JpegCodec;
        let img = ImageHandle::new(16, 16, ColorMode::Rgba, vec![0u8; 16 * 16 * 4]);

        let out =
            search_encoding(&codec, img, &SizeBudget::from_mb(1.0).unwrap(), &SearchPolicy::new())
                .unwrap();
        let decoded = crate::decode::decode_image(&out.bytes).unwrap();

        assert_eq!(decoded.color, ColorMode::Rgb);
        assert!(decoded.pixels.iter().all(|&c| c >= 250));
    }

    #[test]
    fn test_real_codec_reaches_tight_budget() {
        let codec = JpegCodec;
        let img = noise_image(256, 256);

        let out = search_encoding(&codec, img, &budget_bytes(4_000), &SearchPolicy::new()).unwrap();

        assert!(out.within_budget);
        assert!(out.bytes.len() <= 4_000);
        assert!(out.attempts > 1);
        assert!(out.quality < 95 || out.scale < 1.0);
    }

    #[test]
    fn test_codec_failure_propagates() {
        let codec = SyntheticCodec;
        let img = ImageHandle::new(0, 0, ColorMode::Rgb, vec![]);
        let result = search_encoding(&codec, img, &budget_bytes(10), &SearchPolicy::new());
        assert!(result.is_err());
    }
}
