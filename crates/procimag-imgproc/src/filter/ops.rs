use procimag_image::{Image, ImageError, Raster};

use super::{kernels, separable_filter, FloatConversion};

/// Blur an image using a box blur filter
///
/// Every output sample is the mean of the `kernel_size x kernel_size`
/// edge-clamped neighborhood. All channels are filtered.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The side length of the square kernel.
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero or the sizes of `src` and `dst` differ.
pub fn box_blur<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError>
where
    T: FloatConversion + Send + Sync,
{
    if kernel_size == 0 {
        return Err(ImageError::InvalidWindowSize(kernel_size));
    }
    let kernel = kernels::box_blur_kernel_1d(kernel_size);
    separable_filter(src, dst, &kernel, &kernel)
}

/// Blur an image using a gaussian blur filter
///
/// The 1D gaussian kernel is applied horizontally and then vertically, with
/// both passes accumulated in floating point and a single rounding at the
/// final write. Alpha is copied from the source.
///
/// # Arguments
///
/// * `src` - The source RGBA raster.
/// * `dst` - The destination RGBA raster.
/// * `kernel_size` - The size of the kernel, odd and non zero.
/// * `sigma` - The sigma of the gaussian kernel, strictly positive.
///
/// # Errors
///
/// Returns an error if the kernel size is even or zero, if sigma is not a
/// positive finite number, or if the sizes of `src` and `dst` differ.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::filter::gaussian_blur;
///
/// let image = Raster::from_size_pixel(ImageSize { width: 4, height: 4 }, [80, 160, 240, 200]).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// gaussian_blur(&image, &mut out, 5, 1.5).unwrap();
/// assert_eq!(out, image);
/// ```
pub fn gaussian_blur(
    src: &Raster,
    dst: &mut Raster,
    kernel_size: usize,
    sigma: f64,
) -> Result<(), ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelLength(kernel_size));
    }

    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidSigma(sigma));
    }

    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma);
    separable_filter(src, dst, &kernel, &kernel)?;

    // restore alpha
    dst.as_slice_mut()
        .chunks_exact_mut(4)
        .zip(src.as_slice().chunks_exact(4))
        .for_each(|(dst_pixel, src_pixel)| dst_pixel[3] = src_pixel[3]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use procimag_image::{Image, ImageError, ImageSize, Raster};

    #[test]
    fn test_box_blur() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Image::<f32, 1>::new(
            size,
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 9.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        super::box_blur(&img, &mut dst, 3)?;

        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ];
        for (a, e) in dst.as_slice().iter().zip(expected.iter()) {
            approx::assert_relative_eq!(*a, *e, epsilon = 1e-5);
        }

        assert_eq!(
            super::box_blur(&img, &mut dst, 0),
            Err(ImageError::InvalidWindowSize(0))
        );
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_spreads_impulse() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut image = Raster::from_size_pixel(size, [0, 0, 0, 77])?;
        image.set_pixel(2, 2, [255, 255, 255, 77])?;
        let mut out = Raster::from_size_val(size, 0)?;

        super::gaussian_blur(&image, &mut out, 3, 1.0)?;

        let center = out.pixel(2, 2)?[0];
        let side = out.pixel(1, 2)?[0];
        let corner = out.pixel(1, 1)?[0];
        assert!(center > side && side > corner && corner > 0);
        assert_eq!(out.pixel(0, 0)?, &[0, 0, 0, 77]);

        // symmetric response
        assert_eq!(out.pixel(3, 2)?[0], side);
        assert_eq!(out.pixel(2, 1)?[0], side);
        assert_eq!(out.pixel(2, 3)?[0], side);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_matches_2d_convolution() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 6,
        };
        let data = (0..size.height)
            .flat_map(|y| {
                (0..size.width).flat_map(move |x| {
                    let v = |c: usize| ((x * 37 + y * 91 + c * 53) % 256) as u8;
                    [v(0), v(1), v(2), 255]
                })
            })
            .collect();
        let image = Raster::new(size, data)?;
        let mut out = Raster::from_size_val(size, 0)?;

        let (kernel_size, sigma) = (5, 1.2);
        super::gaussian_blur(&image, &mut out, kernel_size, sigma)?;

        let kernel = super::kernels::gaussian_kernel_1d(kernel_size, sigma);
        let r = (kernel_size / 2) as isize;
        for y in 0..size.height {
            for x in 0..size.width {
                for c in 0..3 {
                    let mut acc = 0.0f64;
                    for (j, ky) in kernel.iter().enumerate() {
                        for (i, kx) in kernel.iter().enumerate() {
                            let sx = x as isize + i as isize - r;
                            let sy = y as isize + j as isize - r;
                            let sample = image.pixel_clamped(sx, sy)[c] as f64;
                            acc += *kx as f64 * *ky as f64 * sample;
                        }
                    }
                    let expected = acc.round().clamp(0.0, 255.0) as u8;
                    let actual = out.pixel(x, y)?[c];
                    assert!(
                        actual.abs_diff(expected) <= 1,
                        "({x}, {y}, {c}): {actual} vs {expected}"
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_tiny_sigma_is_identity() -> Result<(), ImageError> {
        let image = Raster::from_size_pixel([4, 3].into(), [100, 150, 200, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::gaussian_blur(&image, &mut out, 3, 1e-200)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid_params() -> Result<(), ImageError> {
        let image = Raster::from_size_val([3, 3].into(), 10)?;
        let mut out = Raster::from_size_val([3, 3].into(), 0)?;

        assert_eq!(
            super::gaussian_blur(&image, &mut out, 4, 1.0),
            Err(ImageError::InvalidKernelLength(4))
        );
        assert_eq!(
            super::gaussian_blur(&image, &mut out, 0, 1.0),
            Err(ImageError::InvalidKernelLength(0))
        );
        assert_eq!(
            super::gaussian_blur(&image, &mut out, 3, 0.0),
            Err(ImageError::InvalidSigma(0.0))
        );
        assert!(out.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
