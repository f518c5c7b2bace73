//! Morphological operators
//!
//! Grayscale morphology applied to each color channel independently, over a
//! fixed 3x3 edge-clamped neighborhood.

/// Dilation, erosion and the operators derived from them.
mod ops;
pub use ops::*;
