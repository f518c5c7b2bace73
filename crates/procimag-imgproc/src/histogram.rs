use procimag_image::{Image, ImageError, Raster};
use rayon::prelude::*;

use crate::parallel;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images. Counts are added to the
/// values already present in `hist`.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use procimag_image::{Image, ImageSize};
/// use procimag_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    if hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (acc, val) in a.iter_mut().zip(b.iter()) {
                    *acc += val;
                }
                a
            },
        );

    for (h, c) in hist.iter_mut().zip(counts.iter()) {
        *h += c;
    }

    Ok(())
}

/// BT.601 luma and chroma of an RGB pixel.
#[inline]
fn rgb_to_yuv(pixel: &[u8]) -> (f64, f64, f64) {
    let (r, g, b) = (pixel[0] as f64, pixel[1] as f64, pixel[2] as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.14713 * r - 0.28886 * g + 0.436 * b;
    let v = 0.615 * r - 0.51499 * g - 0.10001 * b;
    (y, u, v)
}

#[inline]
fn yuv_to_rgb(y: f64, u: f64, v: f64) -> [u8; 3] {
    [
        crate::saturate_u8(y + 1.13983 * v),
        crate::saturate_u8(y - 0.39465 * u - 0.58060 * v),
        crate::saturate_u8(y + 2.03211 * u),
    ]
}

/// Build the 256 level luma plane of `src` and its equalization mapping.
fn equalization_lut(src: &Raster) -> Result<(Image<u8, 1>, [u8; 256]), ImageError> {
    let mut luma = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows(src, &mut luma, |src_pixel, dst_pixel| {
        let (y, _, _) = rgb_to_yuv(src_pixel);
        dst_pixel[0] = crate::saturate_u8(y);
    });

    let mut hist = vec![0usize; 256];
    compute_histogram(&luma, &mut hist, 256)?;

    let total = luma.as_slice().len() as f64;
    let mut cdf = [0.0f64; 256];
    let mut acc = 0usize;
    for (c, &h) in cdf.iter_mut().zip(hist.iter()) {
        acc += h;
        *c = acc as f64 / total;
    }

    // cdf value of the darkest populated level
    let cdf_min = hist
        .iter()
        .position(|&h| h > 0)
        .map(|i| cdf[i])
        .unwrap_or_default();

    let mut lut = [0u8; 256];
    let range = 1.0 - cdf_min;
    if range <= 0.0 {
        log::debug!("equalization: single populated level, identity mapping");
        for (i, l) in lut.iter_mut().enumerate() {
            *l = i as u8;
        }
    } else {
        log::debug!("equalization: cdf_min {cdf_min:.6}");
        for (l, &c) in lut.iter_mut().zip(cdf.iter()) {
            *l = crate::saturate_u8(((c - cdf_min) / range).clamp(0.0, 1.0) * 255.0);
        }
    }

    Ok((luma, lut))
}

/// Equalize the luma histogram of an image, preserving its chroma.
///
/// The pixels are decomposed into BT.601 luma and chroma. The luma levels are
/// remapped through the normalized cumulative histogram, stretched so the
/// darkest populated level maps to 0, and recombined with the original
/// chroma. An image with a single luma level keeps its levels. Alpha is left
/// untouched.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::histogram::equalize_histogram;
///
/// let data = vec![10, 10, 10, 255, 10, 10, 10, 255, 245, 245, 245, 255, 245, 245, 245, 255];
/// let image = Raster::new(ImageSize { width: 2, height: 2 }, data).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// equalize_histogram(&image, &mut out).unwrap();
/// assert_eq!(out.pixel(0, 0).unwrap(), &[0, 0, 0, 255]);
/// assert_eq!(out.pixel(1, 1).unwrap(), &[255, 255, 255, 255]);
/// ```
pub fn equalize_histogram(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    let (_, lut) = equalization_lut(src)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (y, u, v) = rgb_to_yuv(src_pixel);
        let y = lut[crate::saturate_u8(y) as usize] as f64;
        dst_pixel[..3].copy_from_slice(&yuv_to_rgb(y, u, v));
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Equalize the luma histogram of an image and output it as gray.
///
/// Uses the same mapping as [`equalize_histogram`] but discards the chroma:
/// the equalized luma level is written to R, G and B. Alpha is left untouched.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn equalize_histogram_gray(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    crate::check_same_size(src, dst)?;

    let (luma, lut) = equalization_lut(src)?;

    parallel::par_iter_rows_two(src, &luma, dst, |src_pixel, luma_pixel, dst_pixel| {
        dst_pixel[..3].fill(lut[luma_pixel[0] as usize]);
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use procimag_image::{Image, ImageError, ImageSize, Raster};

    #[test]
    fn test_compute_histogram() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
        )?;

        let mut histogram = vec![0; 3];

        super::compute_histogram(&image, &mut histogram, 3)?;
        assert_eq!(histogram, vec![3, 3, 3]);

        let mut histogram = vec![0; 256];
        super::compute_histogram(&image, &mut histogram, 256)?;
        assert_eq!(histogram[255], 2);
        assert_eq!(histogram.iter().sum::<usize>(), 9);

        Ok(())
    }

    #[test]
    fn test_compute_histogram_invalid_bins() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        let mut histogram = vec![0; 4];
        assert_eq!(
            super::compute_histogram(&image, &mut histogram, 0),
            Err(ImageError::InvalidHistogramBins(0))
        );
        assert_eq!(
            super::compute_histogram(&image, &mut histogram, 3),
            Err(ImageError::InvalidHistogramBins(3))
        );
        Ok(())
    }

    fn two_level_gray() -> Result<Raster, ImageError> {
        Raster::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                10, 10, 10, 255, 10, 10, 10, 255, 245, 245, 245, 128, 245, 245, 245, 128,
            ],
        )
    }

    #[test]
    fn test_equalize_two_levels() -> Result<(), ImageError> {
        let image = two_level_gray()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::equalize_histogram(&image, &mut out)?;
        assert_eq!(
            out.as_slice(),
            &[0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 128, 255, 255, 255, 128]
        );

        super::equalize_histogram_gray(&image, &mut out)?;
        assert_eq!(
            out.as_slice(),
            &[0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 128, 255, 255, 255, 128]
        );
        Ok(())
    }

    #[test]
    fn test_equalize_single_level_is_identity() -> Result<(), ImageError> {
        let image = Raster::from_size_pixel([3, 2].into(), [77, 77, 77, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::equalize_histogram(&image, &mut out)?;
        assert_eq!(out, image);
        super::equalize_histogram_gray(&image, &mut out)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn test_equalize_preserves_hue_ordering() -> Result<(), ImageError> {
        // a dark red and a bright blue: the chroma signs survive the stretch
        let image = Raster::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![80, 20, 20, 255, 60, 60, 200, 255],
        )?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::equalize_histogram(&image, &mut out)?;

        let red = out.pixel(0, 0)?;
        assert!(red[0] > red[1] && red[0] > red[2]);
        let blue = out.pixel(1, 0)?;
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
        Ok(())
    }
}
