/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must share a size do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a filter kernel has no coefficient.
    #[error("Invalid kernel length: kernel_x ({0}), kernel_y ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error when a gaussian standard deviation is not a positive finite number.
    #[error("Invalid sigma ({0}), it must be positive, finite and fit the maximum kernel radius")]
    InvalidSigma(f32),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
