use edgel_image::{Image, ImageError};

use super::border::reflect_index;
use crate::parallel::{self, ExecutionStrategy};

/// A 1D kernel with its precomputed anchor.
///
/// Symmetric kernels of odd length are accumulated in mirrored pairs, so that a
/// mirrored input produces an exactly mirrored output.
struct Kernel1d<'a> {
    weights: &'a [f32],
    half: isize,
    symmetric: bool,
}

impl<'a> Kernel1d<'a> {
    fn new(weights: &'a [f32]) -> Self {
        let symmetric = weights.len() % 2 == 1 && weights.iter().eq(weights.iter().rev());
        Self {
            weights,
            half: (weights.len() / 2) as isize,
            symmetric,
        }
    }

    /// Correlate the kernel with the samples around `pos`.
    ///
    /// `sample` receives an index that may lie outside of the signal.
    #[inline]
    fn apply(&self, pos: usize, sample: impl Fn(isize) -> f32) -> f32 {
        let pos = pos as isize;
        if self.symmetric {
            let mut acc = self.weights[self.half as usize] * sample(pos);
            for k in 1..=self.half {
                acc += self.weights[(self.half + k) as usize] * (sample(pos - k) + sample(pos + k));
            }
            acc
        } else {
            self.weights
                .iter()
                .enumerate()
                .fold(0.0, |acc, (i, &w)| acc + w * sample(pos + i as isize - self.half))
        }
    }
}

/// Apply a separable filter with reflect border handling.
///
/// The horizontal kernel is applied first into a temporary buffer and the
/// vertical kernel is then applied to that buffer.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
/// * `strategy` - The execution strategy.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn separable_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    let row_len = cols * C;
    let kernel_x = Kernel1d::new(kernel_x);
    let kernel_y = Kernel1d::new(kernel_y);

    // horizontal pass
    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];
    parallel::for_each_row_mut(&mut temp, row_len, strategy, |r, row_temp| {
        let src_row = &src_data[r * row_len..(r + 1) * row_len];
        for c in 0..cols {
            for ch in 0..C {
                row_temp[c * C + ch] =
                    kernel_x.apply(c, |x| src_row[reflect_index(x, cols) * C + ch]);
            }
        }
    });

    // vertical pass
    let temp = temp.as_slice();
    parallel::for_each_row_mut(dst.as_slice_mut(), row_len, strategy, |r, row_dst| {
        for (i, out) in row_dst.iter_mut().enumerate() {
            *out = kernel_y.apply(r, |y| temp[reflect_index(y, rows) * row_len + i]);
        }
    });

    Ok(())
}
