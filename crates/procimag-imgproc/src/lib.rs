#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

use procimag_image::{Image, ImageError};

/// color transformations module.
pub mod color;

/// dual-raster arithmetic and bitwise logic module.
pub mod core;

/// point operators: brightness, contrast and negative.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// histogram computation and equalization module.
pub mod histogram;

/// morphological operators module.
pub mod morphology;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;

/// Fail with [`ImageError::InvalidImageSize`] unless `src` and `dst` have the
/// same dimensions.
pub(crate) fn check_same_size<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Round and clamp a value into the 8-bit sample range.
///
/// This is the universal saturation policy: overflow and underflow are never
/// errors, they resolve to 255 and 0.
#[inline]
pub(crate) fn saturate_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
