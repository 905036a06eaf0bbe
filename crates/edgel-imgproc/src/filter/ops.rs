use edgel_image::{Image, ImageError};

use super::{border::reflect_index, kernels, separable_filter};
use crate::parallel::{self, ExecutionStrategy};

/// Blur an image using a gaussian blur filter
///
/// The kernel radius is derived from `sigma` (see [`kernels::gaussian_kernel_radius`])
/// and the image borders are reflected, so the output keeps the input size
/// without darkening or brightening the borders.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `sigma` - The standard deviation of the gaussian kernel.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns [`ImageError::InvalidSigma`] if `sigma` is not positive and finite, or
/// if its kernel radius exceeds [`kernels::MAX_GAUSSIAN_RADIUS`].
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use edgel_image::Image;
/// use edgel_imgproc::filter::gaussian_blur;
/// use edgel_imgproc::parallel::ExecutionStrategy;
///
/// let image = Image::<f32, 1>::from_size_val([4, 4].into(), 0.5).unwrap();
/// let mut blurred = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gaussian_blur(&image, &mut blurred, 1.0, ExecutionStrategy::Serial).unwrap();
/// assert!(blurred.as_slice().iter().all(|&v| (v - 0.5).abs() < 1e-6));
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian_kernel_1d(sigma)?;
    separable_filter(src, dst, &kernel, &kernel, strategy)
}

/// Convolve an image with a 3x3 kernel using reflect border handling.
///
/// This is a true convolution, the kernel is flipped in both directions:
/// `dst(r, c) = sum_ij kernel[i][j] * src(r + 1 - i, c + 1 - j)`.
///
/// The contribution of every kernel row is accumulated separately and the
/// rows are summed last, so that antisymmetric kernels cancel exactly on
/// mirrored input.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The 3x3 kernel indexed `[row][col]`.
/// * `strategy` - The execution strategy.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn convolve3x3<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &[[f32; 3]; 3],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
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
    let src_data = src.as_slice();

    parallel::for_each_row_mut(dst.as_slice_mut(), row_len, strategy, |r, row_dst| {
        // source rows read by kernel rows 0, 1 and 2
        let src_rows = [1isize, 0, -1].map(|dr| {
            let y = reflect_index(r as isize + dr, rows);
            &src_data[y * row_len..(y + 1) * row_len]
        });

        for c in 0..cols {
            let src_cols = [1isize, 0, -1].map(|dc| reflect_index(c as isize + dc, cols));
            for ch in 0..C {
                let mut sum = 0.0;
                for (kernel_row, src_row) in kernel.iter().zip(src_rows.iter()) {
                    let mut row_sum = 0.0;
                    for (&k, &x) in kernel_row.iter().zip(src_cols.iter()) {
                        row_sum += k * src_row[x * C + ch];
                    }
                    sum += row_sum;
                }
                row_dst[c * C + ch] = sum;
            }
        }
    });

    Ok(())
}
