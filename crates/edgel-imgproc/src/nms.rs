use edgel_image::{Image, ImageError};

use crate::parallel::{self, ExecutionStrategy};

/// The four orientation bands used to thin a gradient magnitude ridge.
///
/// Each band is 45 degrees wide and centered on the orientation it is named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionBucket {
    /// `[0, 22.5) ∪ [157.5, 180)`
    Deg0,
    /// `[22.5, 67.5)`
    Deg45,
    /// `[67.5, 112.5)`
    Deg90,
    /// `[112.5, 157.5)`
    Deg135,
}

impl DirectionBucket {
    /// Bucket an orientation given in degrees in `[0, 180)`.
    pub fn from_degrees(angle: f32) -> Self {
        if (22.5..67.5).contains(&angle) {
            DirectionBucket::Deg45
        } else if (67.5..112.5).contains(&angle) {
            DirectionBucket::Deg90
        } else if (112.5..157.5).contains(&angle) {
            DirectionBucket::Deg135
        } else {
            DirectionBucket::Deg0
        }
    }

    /// The two `(row, col)` neighbor offsets compared against for this bucket.
    pub fn neighbor_offsets(&self) -> [(isize, isize); 2] {
        match self {
            DirectionBucket::Deg0 => [(0, -1), (0, 1)],
            DirectionBucket::Deg45 => [(-1, 1), (1, -1)],
            DirectionBucket::Deg90 => [(-1, 0), (1, 0)],
            DirectionBucket::Deg135 => [(-1, -1), (1, 1)],
        }
    }
}

/// Thin a gradient magnitude field keeping only its local maxima across the edge.
///
/// An interior pixel keeps its magnitude only if it is strictly greater than both
/// neighbors selected by its [`DirectionBucket`]; ties are suppressed. The outermost
/// ring of pixels is never compared and is always zero in the output.
///
/// # Arguments
///
/// * `magnitude` - The gradient magnitude with shape (H, W).
/// * `direction` - The gradient orientation in degrees with shape (H, W).
/// * `dst` - The suppressed magnitude with shape (H, W).
/// * `strategy` - The execution strategy.
///
/// # Example
///
/// ```
/// use edgel_image::Image;
/// use edgel_imgproc::nms::non_maximum_suppression;
/// use edgel_imgproc::parallel::ExecutionStrategy;
///
/// let magnitude = Image::<f32, 1>::new(
///     [5, 3].into(),
///     vec![0.0, 1.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 1.0, 0.0],
/// ).unwrap();
/// let direction = Image::<f32, 1>::from_size_val(magnitude.size(), 0.0).unwrap();
/// let mut thin = Image::<f32, 1>::from_size_val(magnitude.size(), 0.0).unwrap();
///
/// non_maximum_suppression(&magnitude, &direction, &mut thin, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(thin.as_slice()[5..10], [0.0, 0.0, 3.0, 0.0, 0.0]);
/// ```
pub fn non_maximum_suppression(
    magnitude: &Image<f32, 1>,
    direction: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    for other in [direction.size(), dst.size()] {
        if magnitude.size() != other {
            return Err(ImageError::InvalidImageSize(
                magnitude.cols(),
                magnitude.rows(),
                other.width,
                other.height,
            ));
        }
    }

    let rows = magnitude.rows();
    let cols = magnitude.cols();
    let mag = magnitude.as_slice();
    let dir = direction.as_slice();

    parallel::for_each_row_mut(dst.as_slice_mut(), cols, strategy, |r, row_dst| {
        row_dst.fill(0.0);
        if r == 0 || r + 1 >= rows {
            return;
        }

        for c in 1..cols.saturating_sub(1) {
            let idx = r * cols + c;
            let value = mag[idx];
            let is_max = DirectionBucket::from_degrees(dir[idx])
                .neighbor_offsets()
                .iter()
                .all(|&(dr, dc)| {
                    let nr = (r as isize + dr) as usize;
                    let nc = (c as isize + dc) as usize;
                    value > mag[nr * cols + nc]
                });
            if is_max {
                row_dst[c] = value;
            }
        }
    });

    Ok(())
}
