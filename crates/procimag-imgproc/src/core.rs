use procimag_image::{ImageError, Raster};

use crate::parallel;

/// Arithmetic combination of a primary and a secondary raster.
///
/// With gains `kp` and `ks`, each color sample is computed as:
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `clamp(kp * P + ks * S)`
    Add,
    /// `clamp(kp * P - ks * S)`
    Subtract,
    /// `clamp(|kp * P - ks * S|)`, the absolute difference.
    Modulo,
    /// `clamp(kp * P + ks * S) / 2`
    Average,
}

/// Bitwise combination of rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// `P & S`
    And,
    /// `P | S`
    Or,
    /// `P ^ S`
    Xor,
    /// `!P`, unary: the secondary raster is not read.
    Not,
}

impl LogicOp {
    /// Whether the operation reads a secondary raster.
    pub fn is_binary(&self) -> bool {
        !matches!(self, LogicOp::Not)
    }
}

fn check_sizes(src1: &Raster, src2: &Raster, dst: &Raster) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            src2.width(),
            src2.height(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    Ok(())
}

/// Combine two rasters arithmetically.
///
/// Only R, G and B are combined; alpha is copied from the primary raster.
/// Every result is rounded and clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `src1` - The primary raster P.
/// * `kp` - The gain applied to P.
/// * `src2` - The secondary raster S, already resampled to the size of P.
/// * `ks` - The gain applied to S.
/// * `op` - The combination to apply.
/// * `dst` - The output raster.
///
/// # Errors
///
/// Returns an error if the sizes of the three rasters do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::core::{arithmetic, ArithmeticOp};
///
/// let size = ImageSize { width: 1, height: 1 };
/// let p = Raster::from_size_pixel(size, [200, 50, 10, 255]).unwrap();
/// let s = Raster::from_size_pixel(size, [100, 100, 100, 0]).unwrap();
/// let mut out = Raster::from_size_val(size, 0).unwrap();
///
/// arithmetic(&p, 1.0, &s, 1.0, ArithmeticOp::Modulo, &mut out).unwrap();
/// assert_eq!(out.as_slice(), &[100, 50, 90, 255]);
/// ```
pub fn arithmetic(
    src1: &Raster,
    kp: f64,
    src2: &Raster,
    ks: f64,
    op: ArithmeticOp,
    dst: &mut Raster,
) -> Result<(), ImageError> {
    check_sizes(src1, src2, dst)?;

    parallel::par_iter_rows_two(src1, src2, dst, |p, s, out| {
        for c in 0..3 {
            let a = kp * p[c] as f64;
            let b = ks * s[c] as f64;
            out[c] = match op {
                ArithmeticOp::Add => crate::saturate_u8(a + b),
                ArithmeticOp::Subtract => crate::saturate_u8(a - b),
                ArithmeticOp::Modulo => crate::saturate_u8((a - b).abs()),
                ArithmeticOp::Average => crate::saturate_u8(a + b) / 2,
            };
        }
        out[3] = p[3];
    });

    Ok(())
}

fn bitwise_binary(
    src1: &Raster,
    src2: &Raster,
    dst: &mut Raster,
    f: impl Fn(u8, u8) -> u8 + Send + Sync,
) -> Result<(), ImageError> {
    check_sizes(src1, src2, dst)?;

    parallel::par_iter_rows_two(src1, src2, dst, |p, s, out| {
        for c in 0..3 {
            out[c] = f(p[c], s[c]);
        }
        out[3] = p[3];
    });

    Ok(())
}

/// Compute the bitwise AND of the color samples of two rasters.
///
/// Alpha is copied from `src1`.
///
/// # Errors
///
/// Returns an error if the sizes of the three rasters do not match.
pub fn bitwise_and(src1: &Raster, src2: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    bitwise_binary(src1, src2, dst, |a, b| a & b)
}

/// Compute the bitwise OR of the color samples of two rasters.
///
/// # Errors
///
/// Returns an error if the sizes of the three rasters do not match.
pub fn bitwise_or(src1: &Raster, src2: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    bitwise_binary(src1, src2, dst, |a, b| a | b)
}

/// Compute the bitwise XOR of the color samples of two rasters.
///
/// # Errors
///
/// Returns an error if the sizes of the three rasters do not match.
pub fn bitwise_xor(src1: &Raster, src2: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    bitwise_binary(src1, src2, dst, |a, b| a ^ b)
}

/// Compute the bitwise NOT of the color samples of a raster.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn bitwise_not(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows(src, dst, |p, out| {
        for c in 0..3 {
            out[c] = !p[c];
        }
        out[3] = p[3];
    });

    Ok(())
}

/// Apply a bitwise operation.
///
/// `src2` is ignored for [`LogicOp::Not`], and may then be `None`.
///
/// # Errors
///
/// Returns an error if a binary operation gets no secondary raster, or if
/// the raster sizes do not match.
pub fn logic(
    src1: &Raster,
    src2: Option<&Raster>,
    op: LogicOp,
    dst: &mut Raster,
) -> Result<(), ImageError> {
    let secondary = || src2.ok_or(ImageError::MissingSecondary);
    match op {
        LogicOp::And => bitwise_and(src1, secondary()?, dst),
        LogicOp::Or => bitwise_or(src1, secondary()?, dst),
        LogicOp::Xor => bitwise_xor(src1, secondary()?, dst),
        LogicOp::Not => bitwise_not(src1, dst),
    }
}
