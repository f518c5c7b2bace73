use procimag_image::{Image, ImageError, Raster};

use crate::{filter::box_blur, parallel};

/// Parameters of [`adaptive_threshold`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveThresholdParams {
    /// Global floor: a pixel never passes with an intensity below this level.
    pub threshold: u8,
    /// Side length of the square neighborhood used for the local mean.
    pub window_size: usize,
    /// Constant subtracted from the local mean.
    pub offset: f64,
}

impl Default for AdaptiveThresholdParams {
    fn default() -> Self {
        Self {
            threshold: 0,
            window_size: 15,
            offset: 5.0,
        }
    }
}

/// Unweighted intensity used by the threshold operators.
#[inline]
fn intensity(pixel: &[u8]) -> f32 {
    (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0
}

/// Apply a global binary threshold to an image.
///
/// The intensity of a pixel is the mean of its R, G and B samples. Pixels
/// with an intensity greater than or equal to `threshold` become white, the
/// others black. Alpha is left untouched.
///
/// # Arguments
///
/// * `src` - The input RGBA raster.
/// * `dst` - The output RGBA raster.
/// * `threshold` - The threshold level.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Examples
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::threshold::threshold;
///
/// let data = vec![90, 100, 110, 255, 10, 20, 30, 255];
/// let image = Raster::new(ImageSize { width: 2, height: 1 }, data).unwrap();
///
/// let mut thresholded = Raster::from_size_val(image.size(), 0).unwrap();
///
/// threshold(&image, &mut thresholded, 100).unwrap();
/// assert_eq!(thresholded.as_slice(), &[255, 255, 255, 255, 0, 0, 0, 255]);
/// ```
pub fn threshold(src: &Raster, dst: &mut Raster, threshold: u8) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    let threshold = threshold as f32;
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let v = if intensity(src_pixel) >= threshold {
            255
        } else {
            0
        };
        dst_pixel[..3].fill(v);
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Apply an adaptive binary threshold to an image.
///
/// The intensity plane is computed once. For every pixel the mean intensity of
/// its `window_size x window_size` edge-clamped neighborhood is taken from a
/// separable box filter over that plane, and the pixel becomes white when
///
/// `intensity >= max(local_mean - offset, threshold)`
///
/// and black otherwise. Alpha is left untouched.
///
/// # Errors
///
/// Returns an error if the window size is zero or the sizes of `src` and
/// `dst` do not match.
pub fn adaptive_threshold(
    src: &Raster,
    dst: &mut Raster,
    params: AdaptiveThresholdParams,
) -> Result<(), ImageError> {
    if params.window_size == 0 {
        return Err(ImageError::InvalidWindowSize(params.window_size));
    }
    crate::check_same_size(src, dst)?;

    let mut plane = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    parallel::par_iter_rows(src, &mut plane, |src_pixel, dst_pixel| {
        dst_pixel[0] = intensity(src_pixel);
    });

    let mut local_mean = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    box_blur(&plane, &mut local_mean, params.window_size)?;

    log::debug!(
        "adaptive threshold: window {} offset {} floor {}",
        params.window_size,
        params.offset,
        params.threshold
    );

    let floor = params.threshold as f32;
    let offset = params.offset as f32;
    let width = src.width();
    let (plane, local_mean) = (&plane, &local_mean);
    parallel::par_iter_rows_indexed(dst, |y, row| {
        for x in 0..width {
            let i = y * width + x;
            let t = (local_mean.as_slice()[i] - offset).max(floor);
            let v = if plane.as_slice()[i] >= t { 255 } else { 0 };
            let alpha = src.as_slice()[i * 4 + 3];
            row[x * 4..x * 4 + 4].copy_from_slice(&[v, v, v, alpha]);
        }
    });

    Ok(())
}
