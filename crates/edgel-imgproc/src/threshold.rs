//! Automatic selection of the hysteresis thresholds.
//!
//! The upper threshold is a percentile of the strictly positive suppressed
//! magnitudes; zeros are left out since they stand for suppressed pixels. The
//! lower threshold is a fixed ratio of the upper one.

use edgel_image::Image;

use crate::error::CannyError;

/// Default percentile of the positive magnitudes used as upper threshold.
pub const DEFAULT_HIGH_PERCENTILE: f32 = 70.0;

/// Default ratio between the lower and the upper threshold.
pub const DEFAULT_LOW_RATIO: f32 = 0.4;

/// Parameters of the automatic threshold selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoThreshold {
    /// Percentile in `[0, 100]` of the positive magnitudes used as upper threshold.
    pub high_percentile: f32,
    /// Ratio applied to the upper threshold to obtain the lower threshold.
    pub low_ratio: f32,
}

impl Default for AutoThreshold {
    fn default() -> Self {
        Self {
            high_percentile: DEFAULT_HIGH_PERCENTILE,
            low_ratio: DEFAULT_LOW_RATIO,
        }
    }
}

impl AutoThreshold {
    /// Check that the percentile and the ratio are usable.
    pub fn validate(&self) -> Result<(), CannyError> {
        if !(0.0..=100.0).contains(&self.high_percentile) {
            return Err(CannyError::InvalidParameter(format!(
                "high percentile must be in [0, 100], got {}",
                self.high_percentile
            )));
        }
        if !self.low_ratio.is_finite() || self.low_ratio < 0.0 {
            return Err(CannyError::InvalidParameter(format!(
                "low ratio must be finite and non-negative, got {}",
                self.low_ratio
            )));
        }
        Ok(())
    }
}

/// The resolved hysteresis thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Magnitudes at or above this value may join an edge.
    pub low: f32,
    /// Magnitudes strictly above this value seed an edge.
    pub high: f32,
}

/// Collect the strictly positive values of a magnitude field.
pub fn positive_population(src: &Image<f32, 1>) -> Vec<f32> {
    src.as_slice().iter().copied().filter(|&v| v > 0.0).collect()
}

/// Compute the `p`-th percentile of `values`, interpolating linearly between
/// the two closest order statistics.
///
/// The rank of the percentile is `p / 100 * (n - 1)`. The values are
/// partially reordered in place.
///
/// Returns `None` if `values` is empty.
///
/// # Example
///
/// ```
/// use edgel_imgproc::threshold::percentile;
///
/// let mut values = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&mut values, 50.0), Some(2.5));
/// assert_eq!(percentile(&mut values, 100.0), Some(4.0));
/// ```
pub fn percentile(values: &mut [f32], p: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let n = values.len();
    let rank = (p as f64 / 100.0 * (n - 1) as f64).clamp(0.0, (n - 1) as f64);
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;

    let (_, &mut lower, upper) = values.select_nth_unstable_by(lo, f32::total_cmp);
    let higher = upper
        .iter()
        .copied()
        .min_by(f32::total_cmp)
        .unwrap_or(lower);

    if frac == 0.0 {
        return Some(lower);
    }

    Some((lower as f64 + (higher as f64 - lower as f64) * frac) as f32)
}

/// Resolve the hysteresis thresholds, deriving the missing ones from the
/// suppressed magnitude field.
///
/// The upper threshold, if unset, is the `auto.high_percentile` percentile of the
/// strictly positive magnitudes. The lower threshold, if unset, is
/// `auto.low_ratio` times the resolved upper threshold, whether that one was
/// derived or given.
///
/// # Errors
///
/// [`CannyError::EmptyGradientPopulation`] if the upper threshold must be
/// derived and no magnitude is positive.
pub fn select_thresholds(
    suppressed: &Image<f32, 1>,
    low: Option<f32>,
    high: Option<f32>,
    auto: &AutoThreshold,
) -> Result<Thresholds, CannyError> {
    let high = match high {
        Some(high) => high,
        None => {
            auto.validate()?;
            let mut population = positive_population(suppressed);
            let high = percentile(&mut population, auto.high_percentile)
                .ok_or(CannyError::EmptyGradientPopulation)?;
            log::debug!(
                "upper threshold {high} from {} positive magnitudes",
                population.len()
            );
            high
        }
    };

    let low = match low {
        Some(low) => low,
        None => {
            auto.validate()?;
            auto.low_ratio * high
        }
    };

    Ok(Thresholds { low, high })
}
