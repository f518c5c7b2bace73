use procimag_image::{ImageError, Raster};

use crate::parallel;

use super::hsl::{hsl_to_rgb, rgb_to_hsl};

/// Scale each color channel by its own gain.
///
/// dst(x,y,c) = clamp(src(x,y,c) * gains[c]) for c in R, G, B
///
/// Alpha is preserved.
///
/// # Arguments
///
/// * `src` - The input RGBA raster.
/// * `dst` - The output RGBA raster.
/// * `gains` - The red, green and blue gains.
pub fn adjust_channel_gain(
    src: &Raster,
    dst: &mut Raster,
    gains: [f64; 3],
) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for c in 0..3 {
            dst_pixel[c] = crate::saturate_u8(src_pixel[c] as f64 * gains[c]);
        }
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Scale the HSL saturation of every pixel.
///
/// The saturation is multiplied by `factor` and clamped to `[0, 1]`; a factor
/// of zero produces gray, a factor of one leaves the colors as they are (up
/// to the ±1 rounding of the HSL round trip).
pub fn adjust_saturation(src: &Raster, dst: &mut Raster, factor: f64) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (h, s, l) = rgb_to_hsl(src_pixel[0], src_pixel[1], src_pixel[2]);
        let rgb = hsl_to_rgb(h, (s * factor).clamp(0.0, 1.0), l);
        dst_pixel[..3].copy_from_slice(&rgb);
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Rotate the hue of every pixel by `degrees`.
///
/// The rotated hue wraps around into `[0, 360)`, negative shifts included.
pub fn adjust_hue(src: &Raster, dst: &mut Raster, degrees: f64) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (h, s, l) = rgb_to_hsl(src_pixel[0], src_pixel[1], src_pixel[2]);
        let rgb = hsl_to_rgb(h + degrees, s, l);
        dst_pixel[..3].copy_from_slice(&rgb);
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}
