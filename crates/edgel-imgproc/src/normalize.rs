//! Rendering of float fields, such as a gradient magnitude, as 8-bit images.

use num_traits::Float;

use edgel_image::{Image, ImageError};

/// Find the maximum value of an image.
///
/// Returns `None` for an empty image.
pub fn find_max<T: Float, const C: usize>(src: &Image<T, C>) -> Option<T> {
    src.as_slice().iter().copied().reduce(T::max)
}

/// Scale an image so that its maximum maps to 255 and cast it to `u8`.
///
/// Every value becomes `trunc(value / max * 255)`, clamped to `[0, 255]`. If the
/// maximum is not positive the destination is filled with zeros.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `dst` - The output image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use edgel_image::Image;
/// use edgel_imgproc::normalize::normalize_max_to_u8;
///
/// let magnitude = Image::<f32, 1>::new([3, 1].into(), vec![0.0, 2.0, 4.0]).unwrap();
/// let mut rendered = Image::<u8, 1>::from_size_val(magnitude.size(), 0).unwrap();
///
/// normalize_max_to_u8(&magnitude, &mut rendered).unwrap();
/// assert_eq!(rendered.as_slice(), &[0, 127, 255]);
/// ```
pub fn normalize_max_to_u8<T: Float, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let max_val = match find_max(src) {
        Some(max_val) if max_val > T::zero() => max_val,
        _ => {
            dst.as_slice_mut().fill(0);
            return Ok(());
        }
    };

    let cast_error = || ImageError::CastError(std::any::type_name::<u8>().to_string());
    let scale = T::from(255.0).ok_or_else(cast_error)?;

    for (&src_val, dst_val) in src.as_slice().iter().zip(dst.as_slice_mut()) {
        let scaled = (src_val / max_val * scale).max(T::zero()).min(scale);
        *dst_val = scaled.to_u8().ok_or_else(cast_error)?;
    }

    Ok(())
}
