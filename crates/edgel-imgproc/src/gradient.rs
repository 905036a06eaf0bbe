//! Image gradient estimation.
//!
//! The gradient of a single channel image is estimated with the 3x3 sobel
//! kernels, and summarized per pixel as a magnitude and an undirected
//! orientation in degrees.

use edgel_image::{Image, ImageError};

use crate::filter::{convolve3x3, kernels};
use crate::parallel::{self, ExecutionStrategy};

/// Compute the first order image derivatives in x and y using the sobel kernels.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `gx` - The horizontal derivative with shape (H, W, C).
/// * `gy` - The vertical derivative with shape (H, W, C).
/// * `strategy` - The execution strategy.
///
/// PRECONDITION: `src`, `gx` and `gy` must have the same shape.
pub fn spatial_gradient<const C: usize>(
    src: &Image<f32, C>,
    gx: &mut Image<f32, C>,
    gy: &mut Image<f32, C>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let (sobel_x, sobel_y) = kernels::sobel_kernel3();
    convolve3x3(src, gx, &sobel_x, strategy)?;
    convolve3x3(src, gy, &sobel_y, strategy)?;
    Ok(())
}

/// Compute the gradient magnitude `sqrt(gx^2 + gy^2)`.
///
/// PRECONDITION: `gx`, `gy` and `dst` must have the same shape.
pub fn magnitude<const C: usize>(
    gx: &Image<f32, C>,
    gy: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_same_size(gx, gy)?;
    check_same_size(gx, dst)?;

    parallel::for_each_pixel_two(
        gx.as_slice(),
        gy.as_slice(),
        dst.as_slice_mut(),
        strategy,
        |&x, &y, out| *out = (x * x + y * y).sqrt(),
    );

    Ok(())
}

/// Compute the undirected gradient orientation in degrees, in `[0, 180)`.
///
/// # Example
///
/// ```
/// use edgel_imgproc::gradient::orientation_degrees;
///
/// assert_eq!(orientation_degrees(1.0, 0.0), 0.0);
/// assert_eq!(orientation_degrees(-1.0, 0.0), 0.0);
/// assert!((orientation_degrees(-1.0, -1.0) - 45.0).abs() < 1e-4);
/// ```
#[inline]
pub fn orientation_degrees(gx: f32, gy: f32) -> f32 {
    let mut angle = gy.atan2(gx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    // angles rounding onto the 0/180 seam are horizontal
    if !(0.0..180.0).contains(&angle) {
        angle = 0.0;
    }
    angle
}

/// Compute the gradient orientation field, see [`orientation_degrees`].
///
/// PRECONDITION: `gx`, `gy` and `dst` must have the same shape.
pub fn direction<const C: usize>(
    gx: &Image<f32, C>,
    gy: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_same_size(gx, gy)?;
    check_same_size(gx, dst)?;

    parallel::for_each_pixel_two(
        gx.as_slice(),
        gy.as_slice(),
        dst.as_slice_mut(),
        strategy,
        |&x, &y, out| *out = orientation_degrees(x, y),
    );

    Ok(())
}

/// The gradient of a grayscale image and its derived fields.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Horizontal derivative.
    pub gx: Image<f32, 1>,
    /// Vertical derivative.
    pub gy: Image<f32, 1>,
    /// Gradient magnitude, non-negative.
    pub magnitude: Image<f32, 1>,
    /// Gradient orientation in degrees, in `[0, 180)`.
    pub direction: Image<f32, 1>,
}

impl GradientField {
    /// Estimate the gradient of `src` and derive its magnitude and direction.
    pub fn compute(src: &Image<f32, 1>, strategy: ExecutionStrategy) -> Result<Self, ImageError> {
        let mut gx = Image::from_size_val(src.size(), 0.0)?;
        let mut gy = Image::from_size_val(src.size(), 0.0)?;
        spatial_gradient(src, &mut gx, &mut gy, strategy)?;

        let mut magnitude_field = Image::from_size_val(src.size(), 0.0)?;
        magnitude(&gx, &gy, &mut magnitude_field, strategy)?;

        let mut direction_field = Image::from_size_val(src.size(), 0.0)?;
        direction(&gx, &gy, &mut direction_field, strategy)?;

        Ok(Self {
            gx,
            gy,
            magnitude: magnitude_field,
            direction: direction_field,
        })
    }
}

fn check_same_size<const C: usize>(
    a: &Image<f32, C>,
    b: &Image<f32, C>,
) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            a.cols(),
            a.rows(),
            b.cols(),
            b.rows(),
        ));
    }
    Ok(())
}
