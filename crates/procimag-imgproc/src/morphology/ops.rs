use procimag_image::{ImageError, Raster};

use crate::filter::{reduce_neighborhood, Window};

/// Side length of the structuring element.
const ELEMENT_SIZE: usize = 3;

/// Which contour [`contour`] extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourMode {
    /// `original - min`: the boundary inside the shapes.
    Inner,
    /// `max - original`: the boundary outside the shapes.
    Outer,
    /// `max - min`: the morphological gradient.
    #[default]
    Gradient,
}

fn element() -> Result<Window, ImageError> {
    Window::new(ELEMENT_SIZE)
}

/// Dilate an image.
///
/// Dilation expands bright regions in the image. Each color sample is
/// replaced by the maximum of its 3x3 neighborhood. Alpha is preserved.
///
/// # Arguments
///
/// * `src` - The source RGBA raster.
/// * `dst` - The destination RGBA raster.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn dilate(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    reduce_neighborhood(src, dst, element()?, |samples, _| {
        samples.iter().copied().max().unwrap_or_default()
    })
}

/// Erode an image.
///
/// Erosion shrinks bright regions in the image. Each color sample is replaced
/// by the minimum of its 3x3 neighborhood. Alpha is preserved.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn erode(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    reduce_neighborhood(src, dst, element()?, |samples, _| {
        samples.iter().copied().min().unwrap_or_default()
    })
}

/// Extract the contour of the shapes in an image.
///
/// The 3x3 neighborhood minimum and maximum are computed in a single pass per
/// sample and combined with the original value according to `mode`.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::morphology::{contour, ContourMode};
///
/// let mut image = Raster::from_size_pixel(ImageSize { width: 3, height: 3 }, [0, 0, 0, 255]).unwrap();
/// image.set_pixel(1, 1, [255, 255, 255, 255]).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// contour(&image, &mut out, ContourMode::Inner).unwrap();
/// assert_eq!(out.pixel(1, 1).unwrap(), &[255, 255, 255, 255]);
/// assert_eq!(out.pixel(0, 0).unwrap(), &[0, 0, 0, 255]);
/// ```
pub fn contour(src: &Raster, dst: &mut Raster, mode: ContourMode) -> Result<(), ImageError> {
    reduce_neighborhood(src, dst, element()?, |samples, center| {
        let value = samples[center];
        let (min, max) = samples
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        // min <= value <= max, so none of these can underflow
        match mode {
            ContourMode::Inner => value - min,
            ContourMode::Outer => max - value,
            ContourMode::Gradient => max - min,
        }
    })
}

/// Opening: erosion followed by dilation.
///
/// Removes small bright specks while keeping the size of larger shapes.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn open(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    let mut temp_img = src.clone();
    erode(src, &mut temp_img)?;
    dilate(&temp_img, dst)?;
    Ok(())
}

/// Closing: dilation followed by erosion.
///
/// Fills small holes and smooths object boundaries.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn close(src: &Raster, dst: &mut Raster) -> Result<(), ImageError> {
    let mut temp_img = src.clone();
    dilate(src, &mut temp_img)?;
    erode(&temp_img, dst)?;
    Ok(())
}
