use procimag_image::{ImageError, Raster};

use crate::parallel;

/// How [`adjust_brightness`] applies its factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMode {
    /// dst = src + factor
    #[default]
    Additive,
    /// dst = src * factor
    Multiplicative,
}

/// Adjust the brightness of an image.
///
/// dst(x,y,c) = clamp(src(x,y,c) + factor)   (additive)
/// dst(x,y,c) = clamp(src(x,y,c) * factor)   (multiplicative)
///
/// The result is rounded and clamped to `[0, 255]`. Alpha is left untouched.
///
/// # Arguments
///
/// * `src` - The input RGBA raster.
/// * `dst` - The output RGBA raster.
/// * `factor` - The offset or gain to apply to each color sample.
/// * `mode` - Whether `factor` is added or multiplied.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::enhance::{adjust_brightness, BrightnessMode};
///
/// let image = Raster::from_size_pixel(ImageSize { width: 1, height: 1 }, [250, 10, 0, 255]).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// adjust_brightness(&image, &mut out, 10.0, BrightnessMode::Additive).unwrap();
/// assert_eq!(out.as_slice(), &[255, 20, 10, 255]);
/// ```
pub fn adjust_brightness(
    src: &Raster,
    dst: &mut Raster,
    factor: f64,
    mode: BrightnessMode,
) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for c in 0..3 {
            let v = src_pixel[c] as f64;
            let v = match mode {
                BrightnessMode::Additive => v + factor,
                BrightnessMode::Multiplicative => v * factor,
            };
            dst_pixel[c] = crate::saturate_u8(v);
        }
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Adjust the contrast of an image around mid gray.
///
/// dst(x,y,c) = clamp((src(x,y,c) - 128) * factor + 128)
///
/// Alpha is left untouched.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_contrast(src: &Raster, dst: &mut Raster, factor: f64) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for c in 0..3 {
            let v = (src_pixel[c] as f64 - 128.0) * factor + 128.0;
            dst_pixel[c] = crate::saturate_u8(v);
        }
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Compute the photographic negative of an image.
///
/// dst(x,y,c) = 255 - src(x,y,c)
///
/// Alpha is left untouched, so applying the negative twice restores the
/// input exactly.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn negative(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for c in 0..3 {
            dst_pixel[c] = 255 - src_pixel[c];
        }
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}
