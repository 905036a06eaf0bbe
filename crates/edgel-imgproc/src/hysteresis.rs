//! Double threshold classification and edge tracking by hysteresis.

use std::collections::VecDeque;

use edgel_image::{Image, ImageError};

/// Value of an edge pixel in the edge map.
pub const EDGE: u8 = 255;

/// Value of a non-edge pixel in the edge map.
pub const NOT_EDGE: u8 = 0;

/// The class of a pixel after double thresholding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeClass {
    /// Below the lower threshold, never part of an edge.
    #[default]
    None,
    /// Between the thresholds, part of an edge only if connected to a strong pixel.
    Weak,
    /// Above the upper threshold, always part of an edge.
    Strong,
}

impl EdgeClass {
    /// Classify a suppressed magnitude.
    ///
    /// A magnitude strictly above `high` is strong, otherwise one at or above
    /// `low` is weak. When `low > high` the strong test wins.
    #[inline]
    pub fn from_magnitude(magnitude: f32, low: f32, high: f32) -> Self {
        if magnitude > high {
            EdgeClass::Strong
        } else if magnitude >= low {
            EdgeClass::Weak
        } else {
            EdgeClass::None
        }
    }
}

/// Classify every pixel of a suppressed magnitude field, see [`EdgeClass::from_magnitude`].
pub fn classify(suppressed: &Image<f32, 1>, low: f32, high: f32) -> Image<EdgeClass, 1> {
    suppressed.map(|&m| EdgeClass::from_magnitude(m, low, high))
}

/// Trace edges from the strong pixels through the connected weak pixels.
///
/// Every strong pixel is an edge, and so is every weak pixel reachable from a
/// strong one through a chain of weak or strong pixels in the 8-neighborhood.
/// The edge map holds [`EDGE`] for edge pixels and [`NOT_EDGE`] elsewhere.
///
/// # Arguments
///
/// * `suppressed` - The suppressed gradient magnitude with shape (H, W).
/// * `dst` - The edge map with shape (H, W).
/// * `low` - The lower threshold, inclusive.
/// * `high` - The upper threshold, exclusive.
///
/// # Example
///
/// ```
/// use edgel_image::Image;
/// use edgel_imgproc::hysteresis::hysteresis;
///
/// let suppressed = Image::<f32, 1>::new([5, 1].into(), vec![5.0, 2.0, 0.0, 2.0, 2.0]).unwrap();
/// let mut edges = Image::<u8, 1>::from_size_val(suppressed.size(), 0).unwrap();
///
/// hysteresis(&suppressed, &mut edges, 1.0, 3.0).unwrap();
/// assert_eq!(edges.as_slice(), &[255, 255, 0, 0, 0]);
/// ```
pub fn hysteresis(
    suppressed: &Image<f32, 1>,
    dst: &mut Image<u8, 1>,
    low: f32,
    high: f32,
) -> Result<(), ImageError> {
    if suppressed.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            suppressed.cols(),
            suppressed.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = suppressed.rows();
    let cols = suppressed.cols();
    let mag = suppressed.as_slice();
    let out = dst.as_slice_mut();
    out.fill(NOT_EDGE);

    let mut queue = VecDeque::with_capacity(mag.len());
    for (idx, &m) in mag.iter().enumerate() {
        if m > high {
            out[idx] = EDGE;
            queue.push_back(idx);
        }
    }
    let num_seeds = queue.len();
    let mut num_edges = num_seeds;

    while let Some(idx) = queue.pop_front() {
        let r = idx / cols;
        let c = idx % cols;
        for nr in r.saturating_sub(1)..(r + 2).min(rows) {
            for nc in c.saturating_sub(1)..(c + 2).min(cols) {
                let nidx = nr * cols + nc;
                if out[nidx] == NOT_EDGE && mag[nidx] >= low {
                    out[nidx] = EDGE;
                    num_edges += 1;
                    queue.push_back(nidx);
                }
            }
        }
    }

    log::debug!("hysteresis: {num_seeds} strong seeds grew into {num_edges} edge pixels");

    Ok(())
}
