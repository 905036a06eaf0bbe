//! Filter operations
//!
//! This module provides the filters the edge detector is built on: a separable
//! gaussian blur and a direct 3x3 convolution, both with reflect borders.

/// Border handling
pub mod border;

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
