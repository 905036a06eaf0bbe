use edgel_image::ImageError;

/// Number of standard deviations covered on each side of a gaussian kernel.
pub const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Largest supported gaussian kernel radius.
pub const MAX_GAUSSIAN_RADIUS: usize = 1 << 16;

/// Compute the radius of a gaussian kernel for a given sigma.
///
/// The radius is `floor(GAUSSIAN_TRUNCATE * sigma + 0.5)`, which always covers
/// more than three standard deviations.
///
/// Returns `None` if `sigma` is not positive and finite, or if the radius
/// exceeds [`MAX_GAUSSIAN_RADIUS`].
pub fn gaussian_kernel_radius(sigma: f32) -> Option<usize> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    let radius = GAUSSIAN_TRUNCATE * sigma + 0.5;
    if radius >= (MAX_GAUSSIAN_RADIUS + 1) as f32 {
        return None;
    }
    Some(radius as usize)
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A normalized kernel of length `2 * gaussian_kernel_radius(sigma) + 1`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidSigma`] if [`gaussian_kernel_radius`] rejects `sigma`.
pub fn gaussian_kernel_1d(sigma: f32) -> Result<Vec<f32>, ImageError> {
    let radius = gaussian_kernel_radius(sigma).ok_or(ImageError::InvalidSigma(sigma))? as isize;
    let sigma_sq = sigma as f64 * sigma as f64;

    // compute the kernel in double precision
    let kernel = (-radius..=radius)
        .map(|i| {
            let x = i as f64;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<f64>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    Ok(kernel.iter().map(|k| (k / norm) as f32).collect())
}

/// Create the 3x3 sobel kernels.
///
/// # Returns
///
/// The kernels `(sobel_x, sobel_y)`, indexed `[row][col]`.
pub fn sobel_kernel3() -> ([[f32; 3]; 3], [[f32; 3]; 3]) {
    let sobel_x = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let sobel_y = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
    (sobel_x, sobel_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sobel_kernel3() {
        let (kernel_x, kernel_y) = sobel_kernel3();
        assert_eq!(kernel_x[1], [-2.0, 0.0, 2.0]);
        assert_eq!(kernel_y[2], [1.0, 2.0, 1.0]);
        // the y kernel is the transpose of the x kernel
        for (r, row) in kernel_x.iter().enumerate() {
            for (c, &k) in row.iter().enumerate() {
                assert_eq!(k, kernel_y[c][r]);
            }
        }
    }

    #[test]
    fn test_gaussian_kernel_radius() {
        assert_eq!(gaussian_kernel_radius(0.5), Some(2));
        assert_eq!(gaussian_kernel_radius(1.0), Some(4));
        assert_eq!(gaussian_kernel_radius(3.0), Some(12));
        for sigma in [0.3f32, 0.8, 1.4, 2.2, 5.0] {
            let radius = gaussian_kernel_radius(sigma).unwrap_or(0);
            assert!(radius as f32 >= 3.0 * sigma);
        }
    }

    #[test]
    fn test_gaussian_kernel_radius_bounds() {
        assert_eq!(gaussian_kernel_radius(16384.0), Some(MAX_GAUSSIAN_RADIUS));
        for sigma in [0.0, -1.0, f32::NAN, f32::INFINITY, 16384.25, 1e9, 1e17, 1e19] {
            assert_eq!(gaussian_kernel_radius(sigma), None, "sigma {sigma}");
        }
    }

    #[test]
    fn test_gaussian_kernel_1d_huge_sigma() {
        for sigma in [1e9, 1e17, 1e19, f32::MAX] {
            assert!(matches!(
                gaussian_kernel_1d(sigma),
                Err(ImageError::InvalidSigma(_))
            ));
        }
    }

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_1d(0.5)?;

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        assert_eq!(kernel.len(), expected.len());
        for (&k, &e) in kernel.iter().zip(expected.iter()) {
            assert_relative_eq!(k, e, epsilon = 1e-6);
        }

        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_1d_normalized() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_1d(3.0)?;
        assert_eq!(kernel.len(), 25);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        // symmetric and peaked at the center
        assert!(kernel.iter().eq(kernel.iter().rev()));
        assert!(kernel.windows(2).take(12).all(|w| w[0] < w[1]));

        Ok(())
    }
}
