/// Convert an 8-bit sRGB encoded sample to linear light in `[0, 1]`.
///
/// Uses the piecewise sRGB transfer function: a linear segment below
/// `0.04045` and a 2.4 power law above it.
///
/// # Example
///
/// ```
/// use procimag_imgproc::color::srgb_to_linear;
///
/// assert_eq!(srgb_to_linear(0), 0.0);
/// assert_eq!(srgb_to_linear(255), 1.0);
/// ```
pub fn srgb_to_linear(value: u8) -> f64 {
    let c = value as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear light value to an 8-bit sRGB encoded sample.
///
/// The input is clamped to `[0, 1]` and the result is rounded to the nearest
/// integer sample.
pub fn linear_to_srgb(value: f64) -> u8 {
    let l = value.clamp(0.0, 1.0);
    let c = if l <= 0.0031308 {
        12.92 * l
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    crate::saturate_u8(c * 255.0)
}

/// Lookup table from 8-bit sRGB samples to linear light.
pub(crate) fn srgb_to_linear_lut() -> [f64; 256] {
    let mut lut = [0.0; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = srgb_to_linear(i as u8);
    }
    lut
}
