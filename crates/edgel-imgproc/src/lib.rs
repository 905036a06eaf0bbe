#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// canny edge detection pipeline.
pub mod canny;

/// error types for the edge detection pipeline.
pub mod error;

/// image filtering module.
pub mod filter;

/// image gradient module.
pub mod gradient;

/// hysteresis edge linking module.
pub mod hysteresis;

/// non-maximum suppression module.
pub mod nms;

/// operations to render float fields as 8-bit images.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;

/// automatic threshold selection module.
pub mod threshold;
