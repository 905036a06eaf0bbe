use edgel_image::ImageError;

/// Errors that can occur while detecting edges.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CannyError {
    /// Error related to image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// A parameter or the input image is not valid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Automatic thresholding found no positive gradient magnitude to learn from.
    #[error("No positive gradient magnitude to derive thresholds from")]
    EmptyGradientPopulation,
}
