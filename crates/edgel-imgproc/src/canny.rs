use edgel_image::Image;

use crate::filter::{gaussian_blur, kernels};
use crate::gradient::GradientField;
use crate::hysteresis::hysteresis;
use crate::nms::non_maximum_suppression;
use crate::parallel::ExecutionStrategy;
use crate::threshold::{select_thresholds, AutoThreshold};

pub use crate::error::CannyError;

/// Default standard deviation of the smoothing gaussian.
pub const DEFAULT_SIGMA: f32 = 3.0;

/// Parameters of the canny edge detector.
///
/// Unset thresholds are derived from the image, see
/// [`select_thresholds`](crate::threshold::select_thresholds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyConfig {
    /// Standard deviation of the smoothing gaussian, positive.
    pub sigma: f32,
    /// Lower hysteresis threshold, inclusive.
    pub low_threshold: Option<f32>,
    /// Upper hysteresis threshold, exclusive.
    pub high_threshold: Option<f32>,
    /// Automatic threshold selection used for the unset thresholds.
    pub auto: AutoThreshold,
    /// Execution strategy of the per-pixel stages.
    pub strategy: ExecutionStrategy,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            low_threshold: None,
            high_threshold: None,
            auto: AutoThreshold::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl CannyConfig {
    /// Set the standard deviation of the smoothing gaussian.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set both hysteresis thresholds.
    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.low_threshold = Some(low);
        self.high_threshold = Some(high);
        self
    }

    /// Set the lower hysteresis threshold.
    pub fn with_low_threshold(mut self, low: f32) -> Self {
        self.low_threshold = Some(low);
        self
    }

    /// Set the upper hysteresis threshold.
    pub fn with_high_threshold(mut self, high: f32) -> Self {
        self.high_threshold = Some(high);
        self
    }

    /// Set the automatic threshold selection parameters.
    pub fn with_auto_threshold(mut self, auto: AutoThreshold) -> Self {
        self.auto = auto;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    fn validate(&self) -> Result<(), CannyError> {
        if kernels::gaussian_kernel_radius(self.sigma).is_none() {
            return Err(CannyError::InvalidParameter(format!(
                "sigma must be positive, finite and give a kernel radius of at most {}, got {}",
                kernels::MAX_GAUSSIAN_RADIUS,
                self.sigma
            )));
        }
        for (name, threshold) in [("low", self.low_threshold), ("high", self.high_threshold)] {
            match threshold {
                Some(t) if !t.is_finite() => {
                    return Err(CannyError::InvalidParameter(format!(
                        "{name} threshold must be finite, got {t}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// The result of the canny edge detector and its intermediate fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyOutput {
    /// The gaussian smoothed input.
    pub smoothed: Image<f32, 1>,
    /// The gradient magnitude before non-maximum suppression.
    pub magnitude: Image<f32, 1>,
    /// The gradient magnitude after non-maximum suppression.
    pub suppressed: Image<f32, 1>,
    /// The edge map, 255 on edges and 0 elsewhere.
    pub edges: Image<u8, 1>,
    /// The lower threshold used for hysteresis.
    pub low_threshold: f32,
    /// The upper threshold used for hysteresis.
    pub high_threshold: f32,
}

/// Detect the edges of a grayscale image with the canny algorithm.
///
/// The image is smoothed with a gaussian, its sobel gradient is thinned by
/// non-maximum suppression and the remaining ridges are linked by hysteresis
/// between a lower and an upper threshold.
///
/// # Arguments
///
/// * `src` - The grayscale image with shape (H, W), usually with values in `[0, 1]`.
/// * `config` - The detector parameters.
///
/// # Errors
///
/// * [`CannyError::InvalidParameter`] for a non-positive sigma, an empty image,
///   a non-finite pixel or threshold, or invalid automatic threshold parameters.
/// * [`CannyError::EmptyGradientPopulation`] if a threshold must be derived and
///   the suppressed magnitude has no positive value, e.g. on a flat image.
///
/// # Example
///
/// ```
/// use edgel_image::Image;
/// use edgel_imgproc::canny::{canny, CannyConfig};
///
/// let row = [0.0, 0.0, 255.0, 255.0, 255.0];
/// let image = Image::<f32, 1>::new([5, 5].into(), row.repeat(5)).unwrap();
///
/// let config = CannyConfig::default().with_thresholds(10.0, 30.0);
/// let output = canny(&image, &config).unwrap();
///
/// assert_eq!(output.edges.size(), image.size());
/// assert_eq!(output.edges.get([2, 2, 0]), Some(&255));
/// ```
pub fn canny(src: &Image<f32, 1>, config: &CannyConfig) -> Result<CannyOutput, CannyError> {
    config.validate()?;
    if src.size().is_empty() {
        return Err(CannyError::InvalidParameter(format!(
            "image must not be empty, got {}",
            src.size()
        )));
    }
    if let Some(idx) = src.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(CannyError::InvalidParameter(format!(
            "pixel values must be finite, found {} at index {idx}",
            src.as_slice()[idx]
        )));
    }

    let strategy = config.strategy;
    log::debug!(
        "canny on {} with sigma {} and {:?} strategy",
        src.size(),
        config.sigma,
        strategy
    );

    let mut smoothed = Image::from_size_val(src.size(), 0.0)?;
    gaussian_blur(src, &mut smoothed, config.sigma, strategy)?;

    let field = GradientField::compute(&smoothed, strategy)?;

    let mut suppressed = Image::from_size_val(src.size(), 0.0)?;
    non_maximum_suppression(&field.magnitude, &field.direction, &mut suppressed, strategy)?;

    let thresholds = select_thresholds(
        &suppressed,
        config.low_threshold,
        config.high_threshold,
        &config.auto,
    )?;
    log::debug!(
        "hysteresis thresholds low {} high {}",
        thresholds.low,
        thresholds.high
    );

    let mut edges = Image::from_size_val(src.size(), 0)?;
    hysteresis(&suppressed, &mut edges, thresholds.low, thresholds.high)?;

    Ok(CannyOutput {
        smoothed,
        magnitude: field.magnitude,
        suppressed,
        edges,
        low_threshold: thresholds.low,
        high_threshold: thresholds.high,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use edgel_image::ImageSize;

    fn step_5x5() -> Result<Image<f32, 1>, CannyError> {
        let row = [0.0, 0.0, 255.0, 255.0, 255.0];
        Ok(Image::new([5, 5].into(), row.repeat(5))?)
    }

    #[test]
    fn test_config_builders() {
        let config = CannyConfig::default();
        assert_eq!(config.sigma, DEFAULT_SIGMA);
        assert_eq!(config.low_threshold, None);
        assert_eq!(config.high_threshold, None);
        assert_eq!(config.strategy, ExecutionStrategy::Auto);

        let config = config
            .with_sigma(1.5)
            .with_low_threshold(0.1)
            .with_high_threshold(0.2)
            .with_strategy(ExecutionStrategy::Serial);
        assert_eq!(config.sigma, 1.5);
        assert_eq!(config.low_threshold, Some(0.1));
        assert_eq!(config.high_threshold, Some(0.2));
        assert_eq!(config.strategy, ExecutionStrategy::Serial);

        let config = config.with_thresholds(3.0, 4.0);
        assert_eq!(
            (config.low_threshold, config.high_threshold),
            (Some(3.0), Some(4.0))
        );
    }

    #[test]
    fn test_canny_step_5x5() -> Result<(), CannyError> {
        let image = step_5x5()?;
        let config = CannyConfig::default()
            .with_thresholds(10.0, 30.0)
            .with_strategy(ExecutionStrategy::Serial);
        let output = canny(&image, &config)?;

        #[rustfmt::skip]
        assert_eq!(
            output.edges.as_slice(),
            &[
                0, 0,   0, 0, 0,
                0, 0, 255, 0, 0,
                0, 0, 255, 0, 0,
                0, 0, 255, 0, 0,
                0, 0,   0, 0, 0,
            ]
        );

        let expected = [38.796, 101.367, 124.908, 100.751, 38.413];
        for mag_row in output.magnitude.as_slice().chunks(5) {
            for (&v, &e) in mag_row.iter().zip(expected.iter()) {
                assert_relative_eq!(v, e, epsilon = 5e-2);
            }
        }
        assert_relative_eq!(output.smoothed.as_slice()[2], 153.04242, epsilon = 1e-2);
        assert_eq!(output.low_threshold, 10.0);
        assert_eq!(output.high_threshold, 30.0);

        Ok(())
    }

    #[test]
    fn test_canny_auto_thresholds() -> Result<(), CannyError> {
        let image = step_5x5()?;
        let config = CannyConfig::default().with_strategy(ExecutionStrategy::Serial);
        let output = canny(&image, &config)?;

        // the three surviving ridge pixels share the same magnitude
        let ridge = output.suppressed.as_slice()[7];
        assert_eq!(output.high_threshold, ridge);
        assert_relative_eq!(output.low_threshold, 0.4 * ridge, epsilon = 1e-4);
        assert!(output.edges.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn test_canny_flat_image() -> Result<(), CannyError> {
        let image = Image::<_, 1>::from_size_val([6, 6].into(), 0.5)?;
        assert_eq!(
            canny(&image, &CannyConfig::default()),
            Err(CannyError::EmptyGradientPopulation)
        );

        // explicit thresholds never look at the gradient population
        let output = canny(&image, &CannyConfig::default().with_thresholds(0.1, 0.2))?;
        assert!(output.magnitude.as_slice().iter().all(|&v| v == 0.0));
        assert!(output.suppressed.as_slice().iter().all(|&v| v == 0.0));
        assert!(output.edges.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn test_canny_invalid_parameters() -> Result<(), CannyError> {
        let image = Image::<_, 1>::from_size_val([4, 4].into(), 0.0)?;
        for sigma in [0.0, -1.0, f32::NAN, 1e17, 1e19] {
            let res = canny(&image, &CannyConfig::default().with_sigma(sigma));
            assert!(matches!(res, Err(CannyError::InvalidParameter(_))));
        }

        let res = canny(&image, &CannyConfig::default().with_low_threshold(f32::NAN));
        assert!(matches!(res, Err(CannyError::InvalidParameter(_))));

        let empty = Image::<f32, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        let res = canny(&empty, &CannyConfig::default());
        assert!(matches!(res, Err(CannyError::InvalidParameter(_))));

        let mut data = vec![0.0; 16];
        data[5] = f32::INFINITY;
        let res = canny(&Image::new([4, 4].into(), data)?, &CannyConfig::default());
        assert!(matches!(res, Err(CannyError::InvalidParameter(_))));

        Ok(())
    }

    #[test]
    fn test_canny_serial_parallel() -> Result<(), CannyError> {
        let size = [23, 17].into();
        let data = (0..23 * 17).map(|i| ((i * 31) % 19) as f32 / 19.0).collect();
        let image = Image::<_, 1>::new(size, data)?;
        let config = CannyConfig::default().with_sigma(1.0);

        let serial = canny(&image, &config.with_strategy(ExecutionStrategy::Serial))?;
        let parallel = canny(&image, &config.with_strategy(ExecutionStrategy::Parallel))?;

        assert_eq!(serial.suppressed, parallel.suppressed);
        assert_eq!(serial.edges, parallel.edges);

        Ok(())
    }
}
