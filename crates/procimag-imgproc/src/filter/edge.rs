use procimag_image::{Image, ImageError, Raster};

use super::kernels::{self, Kernel3};
use crate::{color::gray_from_rgba, parallel};

/// Output mode of the gradient operators [`sobel`] and [`prewitt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Rectified horizontal derivative `|Gx|`.
    X,
    /// Rectified vertical derivative `|Gy|`.
    Y,
    /// Gradient magnitude `hypot(Gx, Gy)`.
    #[default]
    Magnitude,
}

/// Neighborhood of the [`laplacian`] kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaplacianKernel {
    /// 4-connected neighbors, center weight -4.
    #[default]
    Four,
    /// 8-connected neighbors, center weight -8.
    Eight,
}

impl LaplacianKernel {
    fn kernel(&self) -> Kernel3 {
        match self {
            LaplacianKernel::Four => kernels::laplacian4_kernel3(),
            LaplacianKernel::Eight => kernels::laplacian8_kernel3(),
        }
    }

    fn max_response(&self) -> f32 {
        match self {
            LaplacianKernel::Four => 4.0,
            LaplacianKernel::Eight => 8.0,
        }
    }
}

/// Output mode of the [`laplacian`] operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaplacianMode {
    /// Rectified response, `|L| / max`.
    #[default]
    Abs,
    /// Signed response around mid gray, `127.5 + L / (2 * max)`.
    Signed,
}

// the custom kernel response is rectified and divided by this factor
const CUSTOM_KERNEL_SCALE: f32 = 3.0;

/// Convolve the edge-clamped 3x3 neighborhood of `(x, y)` with `kernel`.
#[inline]
fn convolve3(plane: &Image<f32, 1>, x: usize, y: usize, kernel: &Kernel3) -> f32 {
    let mut acc = 0.0;
    for (ky, kernel_row) in kernel.iter().enumerate() {
        for (kx, &k) in kernel_row.iter().enumerate() {
            let v = plane.pixel_clamped(x as isize + kx as isize - 1, y as isize + ky as isize - 1);
            acc += v[0] * k;
        }
    }
    acc
}

/// Compute the luma plane of `src` and fill `dst` with the gray level
/// returned by `f` for every pixel. Alpha is copied from the source.
fn edge_response<F>(src: &Raster, dst: &mut Raster, f: F) -> Result<(), ImageError>
where
    F: Fn(&Image<f32, 1>, usize, usize) -> f32 + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // neighbors are sampled from the luma plane, computed once
    let mut plane = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    gray_from_rgba(src, &mut plane)?;

    let width = src.width();
    let plane = &plane;
    parallel::par_iter_rows_indexed(dst, |y, row| {
        for x in 0..width {
            let v = crate::saturate_u8(f(plane, x, y) as f64);
            let alpha = src.pixel_clamped(x as isize, y as isize)[3];
            row[x * 4..x * 4 + 4].copy_from_slice(&[v, v, v, alpha]);
        }
    });

    Ok(())
}

fn gradient(
    src: &Raster,
    dst: &mut Raster,
    (kernel_x, kernel_y): (Kernel3, Kernel3),
    max_response: f32,
    mode: EdgeMode,
) -> Result<(), ImageError> {
    edge_response(src, dst, |plane, x, y| match mode {
        EdgeMode::X => convolve3(plane, x, y, &kernel_x).abs() / max_response,
        EdgeMode::Y => convolve3(plane, x, y, &kernel_y).abs() / max_response,
        EdgeMode::Magnitude => {
            let gx = convolve3(plane, x, y, &kernel_x);
            let gy = convolve3(plane, x, y, &kernel_y);
            gx.hypot(gy) / (max_response * std::f32::consts::SQRT_2)
        }
    })
}

/// Detect edges with the Sobel operator.
///
/// The 3x3 Sobel kernels are applied to the BT.601 luma of the edge-clamped
/// neighborhood. Responses are divided by 4, the largest weight sum of a
/// Sobel kernel, and the magnitude additionally by `sqrt(2)`. The result is
/// written as gray to R, G and B; alpha is preserved.
///
/// # Arguments
///
/// * `src` - The source RGBA raster.
/// * `dst` - The destination RGBA raster.
/// * `mode` - Which derivative, or the magnitude, to output.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::filter::{sobel, EdgeMode};
///
/// let image = Raster::from_size_pixel(ImageSize { width: 3, height: 3 }, [90, 90, 90, 255]).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// sobel(&image, &mut out, EdgeMode::Magnitude).unwrap();
/// assert!(out.as_slice().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
/// ```
pub fn sobel(src: &Raster, dst: &mut Raster, mode: EdgeMode) -> Result<(), ImageError> {
    gradient(src, dst, kernels::sobel_kernel3(), 4.0, mode)
}

/// Detect edges with the Prewitt operator.
///
/// Same as [`sobel`] with the Prewitt kernels, whose responses are divided by 3.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn prewitt(src: &Raster, dst: &mut Raster, mode: EdgeMode) -> Result<(), ImageError> {
    gradient(src, dst, kernels::prewitt_kernel3(), 3.0, mode)
}

/// Apply the Laplacian operator on the luma plane.
///
/// # Arguments
///
/// * `src` - The source RGBA raster.
/// * `dst` - The destination RGBA raster.
/// * `kernel` - The 4 or 8 neighbor kernel.
/// * `mode` - Rectified or signed output.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn laplacian(
    src: &Raster,
    dst: &mut Raster,
    kernel: LaplacianKernel,
    mode: LaplacianMode,
) -> Result<(), ImageError> {
    let weights = kernel.kernel();
    let max_response = kernel.max_response();
    edge_response(src, dst, |plane, x, y| {
        let response = convolve3(plane, x, y, &weights);
        match mode {
            LaplacianMode::Abs => response.abs() / max_response,
            LaplacianMode::Signed => 127.5 + response / (2.0 * max_response),
        }
    })
}

/// Convolve the luma plane with a caller supplied 3x3 kernel.
///
/// `weights` is row-major. The response is rectified, divided by 3 and
/// clamped to `[0, 255]`.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn custom_kernel(src: &Raster, dst: &mut Raster, weights: &[f32; 9]) -> Result<(), ImageError> {
    let kernel: Kernel3 = [
        [weights[0], weights[1], weights[2]],
        [weights[3], weights[4], weights[5]],
        [weights[6], weights[7], weights[8]],
    ];
    edge_response(src, dst, |plane, x, y| {
        convolve3(plane, x, y, &kernel).abs() / CUSTOM_KERNEL_SCALE
    })
}

#[cfg(test)]
mod tests {
    use super::{EdgeMode, LaplacianKernel, LaplacianMode};
    use procimag_image::{ImageError, ImageSize, Raster};

    // left column black, the rest white
    fn vertical_step() -> Result<Raster, ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut image = Raster::from_size_pixel(size, [255, 255, 255, 100])?;
        for y in 0..3 {
            image.set_pixel(0, y, [0, 0, 0, 100])?;
        }
        Ok(image)
    }

    #[test]
    fn test_sobel_vertical_edge() -> Result<(), ImageError> {
        let image = vertical_step()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;

        // Gx at the center = 4 * 255
        super::sobel(&image, &mut out, EdgeMode::X)?;
        assert_eq!(out.pixel(1, 1)?, &[255, 255, 255, 100]);
        assert_eq!(out.pixel(2, 1)?[0], 0);

        super::sobel(&image, &mut out, EdgeMode::Y)?;
        assert!(out.as_slice().chunks_exact(4).all(|p| p[0] == 0));

        // 255 / sqrt(2)
        super::sobel(&image, &mut out, EdgeMode::Magnitude)?;
        assert_eq!(out.pixel(1, 1)?[0], 180);
        Ok(())
    }

    #[test]
    fn test_prewitt_vertical_edge() -> Result<(), ImageError> {
        let image = vertical_step()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::prewitt(&image, &mut out, EdgeMode::X)?;
        assert_eq!(out.pixel(0, 1)?[0], 255);
        assert_eq!(out.pixel(1, 1)?[0], 255);
        assert_eq!(out.pixel(2, 1)?[0], 0);
        Ok(())
    }

    #[test]
    fn test_laplacian_flat_and_signed() -> Result<(), ImageError> {
        let flat = Raster::from_size_pixel([4, 4].into(), [60, 60, 60, 255])?;
        let mut out = Raster::from_size_val(flat.size(), 0)?;

        super::laplacian(&flat, &mut out, LaplacianKernel::Four, LaplacianMode::Abs)?;
        assert!(out.as_slice().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));

        // zero response maps to mid gray
        super::laplacian(&flat, &mut out, LaplacianKernel::Eight, LaplacianMode::Signed)?;
        assert!(out.as_slice().chunks_exact(4).all(|p| p[0] == 128));
        Ok(())
    }

    #[test]
    fn test_laplacian_point() -> Result<(), ImageError> {
        let mut image = Raster::from_size_pixel([3, 3].into(), [0, 0, 0, 255])?;
        image.set_pixel(1, 1, [255, 255, 255, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;

        // -4 * 255 / 4
        super::laplacian(&image, &mut out, LaplacianKernel::Four, LaplacianMode::Abs)?;
        assert_eq!(out.pixel(1, 1)?[0], 255);
        assert_eq!(out.pixel(0, 0)?[0], 0);
        assert_eq!(out.pixel(1, 0)?[0], 64);

        // 127.5 - 1020 / 8
        super::laplacian(&image, &mut out, LaplacianKernel::Four, LaplacianMode::Signed)?;
        assert_eq!(out.pixel(1, 1)?[0], 0);
        Ok(())
    }

    #[test]
    fn test_custom_kernel_identity() -> Result<(), ImageError> {
        let image = Raster::from_size_pixel([2, 2].into(), [90, 90, 90, 10])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        let identity = [0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0];
        super::custom_kernel(&image, &mut out, &identity)?;
        assert!(out.as_slice().chunks_exact(4).all(|p| p == [90, 90, 90, 10]));
        Ok(())
    }

    #[test]
    fn test_edge_size_mismatch() -> Result<(), ImageError> {
        let image = Raster::from_size_val([2, 2].into(), 0)?;
        let mut out = Raster::from_size_val([3, 2].into(), 0)?;
        assert!(super::sobel(&image, &mut out, EdgeMode::X).is_err());
        Ok(())
    }
}
