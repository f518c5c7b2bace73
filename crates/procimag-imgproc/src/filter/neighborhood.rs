use std::ops::RangeInclusive;

use procimag_image::{ImageError, Raster};

use crate::parallel;

/// A square `size x size` neighborhood around a pixel.
///
/// The window covers the offsets `-r..=size-1-r` on each axis, with
/// `r = size / 2`. For odd sizes this is the usual centered window; for even
/// sizes the extra row and column fall before the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    size: usize,
    radius: usize,
}

impl Window {
    /// Create a new window.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidWindowSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, ImageError> {
        if size == 0 {
            return Err(ImageError::InvalidWindowSize(size));
        }
        Ok(Self {
            size,
            radius: size / 2,
        })
    }

    /// The side length of the window.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The radius `floor(size / 2)` of the window.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The number of samples in the window.
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    /// The per-axis offsets covered by the window.
    pub fn offsets(&self) -> RangeInclusive<isize> {
        -(self.radius as isize)..=(self.size - 1 - self.radius) as isize
    }

    /// Index of the center sample in a row-major gathered window.
    pub fn center_index(&self) -> usize {
        self.radius * self.size + self.radius
    }
}

/// Reduce the edge-clamped neighborhood of every color sample.
///
/// For each pixel and each of the R, G, B channels, the `window.area()`
/// samples of the neighborhood are gathered row-major into a scratch slice and
/// handed to `reduce` together with the index of the center sample; the
/// returned value becomes the destination sample. Out-of-bounds neighbors are
/// replaced by the nearest edge pixel. Alpha is copied from the source.
///
/// `reduce` may reorder the scratch slice freely.
///
/// # Arguments
///
/// * `src` - The source RGBA raster, read only.
/// * `dst` - The destination RGBA raster.
/// * `window` - The neighborhood window.
/// * `reduce` - The reduction applied to each gathered neighborhood.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::filter::{reduce_neighborhood, Window};
///
/// let image = Raster::from_size_pixel(ImageSize { width: 3, height: 3 }, [10, 20, 30, 255]).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// // count the samples of each neighborhood
/// reduce_neighborhood(&image, &mut out, Window::new(3).unwrap(), |samples, _| samples.len() as u8).unwrap();
/// assert_eq!(out.pixel(0, 0).unwrap(), &[9, 9, 9, 255]);
/// ```
pub fn reduce_neighborhood<F>(
    src: &Raster,
    dst: &mut Raster,
    window: Window,
    reduce: F,
) -> Result<(), ImageError>
where
    F: Fn(&mut [u8], usize) -> u8 + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let offsets = window.offsets().collect::<Vec<_>>();
    let center = window.center_index();
    let area = window.area();
    let width = src.width();

    parallel::par_iter_rows_indexed(dst, |y, row| {
        let mut samples = [vec![0u8; area], vec![0u8; area], vec![0u8; area]];

        for x in 0..width {
            let mut i = 0;
            for &dy in offsets.iter() {
                for &dx in offsets.iter() {
                    let pixel = src.pixel_clamped(x as isize + dx, y as isize + dy);
                    samples[0][i] = pixel[0];
                    samples[1][i] = pixel[1];
                    samples[2][i] = pixel[2];
                    i += 1;
                }
            }

            let out = &mut row[x * 4..x * 4 + 4];
            for (c, channel_samples) in samples.iter_mut().enumerate() {
                out[c] = reduce(channel_samples.as_mut_slice(), center);
            }
            out[3] = src.pixel_clamped(x as isize, y as isize)[3];
        }
    });

    Ok(())
}
