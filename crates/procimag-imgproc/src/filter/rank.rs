use procimag_image::{ImageError, Raster};

use super::neighborhood::{reduce_neighborhood, Window};

/// The reduction applied by [`local_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFilterKind {
    /// Neighborhood minimum.
    Min,
    /// Neighborhood maximum.
    Max,
    /// Neighborhood mean, rounded to the nearest integer.
    Mean,
}

/// Replace every sample with the min, max or mean of its neighborhood.
///
/// # Arguments
///
/// * `src` - The source RGBA raster.
/// * `dst` - The destination RGBA raster.
/// * `kind` - The reduction to apply.
/// * `size` - The side length of the square neighborhood.
///
/// # Errors
///
/// Returns an error if `size` is zero or the sizes of `src` and `dst` differ.
pub fn local_filter(
    src: &Raster,
    dst: &mut Raster,
    kind: LocalFilterKind,
    size: usize,
) -> Result<(), ImageError> {
    let window = Window::new(size)?;
    match kind {
        LocalFilterKind::Min => reduce_neighborhood(src, dst, window, |samples, _| {
            samples.iter().copied().min().unwrap_or_default()
        }),
        LocalFilterKind::Max => reduce_neighborhood(src, dst, window, |samples, _| {
            samples.iter().copied().max().unwrap_or_default()
        }),
        LocalFilterKind::Mean => reduce_neighborhood(src, dst, window, |samples, _| {
            let sum = samples.iter().map(|&v| v as u64).sum::<u64>();
            let n = samples.len() as u64;
            ((sum + n / 2) / n) as u8
        }),
    }
}

/// Apply a median filter.
///
/// The neighborhood samples are sorted and the middle one is taken. An even
/// sample count averages the two central values, rounding half up.
///
/// # Errors
///
/// Returns an error if `size` is zero or the sizes of `src` and `dst` differ.
///
/// # Example
///
/// ```
/// use procimag_image::{ImageSize, Raster};
/// use procimag_imgproc::filter::median_filter;
///
/// let data = (1..=9u8).flat_map(|v| [v * 10, 0, 0, 255]).collect();
/// let image = Raster::new(ImageSize { width: 3, height: 3 }, data).unwrap();
/// let mut out = Raster::from_size_val(image.size(), 0).unwrap();
///
/// median_filter(&image, &mut out, 3).unwrap();
/// assert_eq!(out.pixel(1, 1).unwrap(), &[50, 0, 0, 255]);
/// ```
pub fn median_filter(src: &Raster, dst: &mut Raster, size: usize) -> Result<(), ImageError> {
    let window = Window::new(size)?;
    reduce_neighborhood(src, dst, window, |samples, _| {
        samples.sort_unstable();
        let mid = samples.len() / 2;
        if samples.len() % 2 == 1 {
            samples[mid]
        } else {
            ((samples[mid - 1] as u16 + samples[mid] as u16 + 1) / 2) as u8
        }
    })
}

/// Apply an order-statistic filter.
///
/// The neighborhood samples are sorted ascending and the `k`-th smallest
/// (1-based) is taken. `k` is clamped to `[1, size * size]`, so `k = 1` is a
/// minimum filter and `k = size * size` a maximum filter.
///
/// # Errors
///
/// Returns an error if `size` is zero or the sizes of `src` and `dst` differ.
pub fn order_filter(
    src: &Raster,
    dst: &mut Raster,
    size: usize,
    k: usize,
) -> Result<(), ImageError> {
    let window = Window::new(size)?;
    let rank = k.clamp(1, window.area()) - 1;
    reduce_neighborhood(src, dst, window, move |samples, _| {
        *samples.select_nth_unstable(rank).1
    })
}

/// Apply conservative smoothing.
///
/// The center sample is clamped into the `[min, max]` range of its neighbors,
/// the center itself excluded. Samples already inside the range are left
/// unchanged, and a window without neighbors leaves the image as it is.
///
/// # Errors
///
/// Returns an error if `size` is zero or the sizes of `src` and `dst` differ.
pub fn conservative_smoothing(
    src: &Raster,
    dst: &mut Raster,
    size: usize,
) -> Result<(), ImageError> {
    let window = Window::new(size)?;
    reduce_neighborhood(src, dst, window, |samples, center| {
        let value = samples[center];
        let neighbors = samples
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != center)
            .map(|(_, &v)| v);

        let (min, max) = neighbors.fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min > max {
            // no neighbors
            return value;
        }
        value.clamp(min, max)
    })
}

#[cfg(test)]
mod tests {
    use super::LocalFilterKind;
    use procimag_image::{ImageError, ImageSize, Raster};

    fn ramp_3x3() -> Result<Raster, ImageError> {
        // red = 10..=90 row-major, green constant, blue inverted
        let data = (1..=9u8)
            .flat_map(|v| [v * 10, 7, 100 - v * 10, 255])
            .collect::<Vec<_>>();
        Raster::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            data,
        )
    }

    #[test]
    fn test_local_filter_min_max_mean() -> Result<(), ImageError> {
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;

        super::local_filter(&image, &mut out, LocalFilterKind::Min, 3)?;
        assert_eq!(out.pixel(1, 1)?, &[10, 7, 10, 255]);
        // (2, 2) clamps to the bottom-right block 50,60,80,90
        assert_eq!(out.pixel(2, 2)?, &[50, 7, 10, 255]);

        super::local_filter(&image, &mut out, LocalFilterKind::Max, 3)?;
        assert_eq!(out.pixel(1, 1)?, &[90, 7, 90, 255]);
        assert_eq!(out.pixel(0, 0)?, &[50, 7, 90, 255]);

        super::local_filter(&image, &mut out, LocalFilterKind::Mean, 3)?;
        assert_eq!(out.pixel(1, 1)?, &[50, 7, 50, 255]);
        // (0,0): 10,10,20,10,10,20,40,40,50 -> 210 / 9 = 23.3
        assert_eq!(out.pixel(0, 0)?[0], 23);

        Ok(())
    }

    #[test]
    fn test_local_filter_size_one_is_identity() -> Result<(), ImageError> {
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::local_filter(&image, &mut out, LocalFilterKind::Mean, 1)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn test_local_filter_zero_window() -> Result<(), ImageError> {
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        assert_eq!(
            super::local_filter(&image, &mut out, LocalFilterKind::Min, 0),
            Err(ImageError::InvalidWindowSize(0))
        );
        assert!(out.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_median_filter() -> Result<(), ImageError> {
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::median_filter(&image, &mut out, 3)?;
        assert_eq!(out.pixel(1, 1)?, &[50, 7, 50, 255]);
        Ok(())
    }

    #[test]
    fn test_median_filter_even_window() -> Result<(), ImageError> {
        // 2x2 window at (1, 1) covers offsets -1..=0: values 10, 20, 40, 50
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::median_filter(&image, &mut out, 2)?;
        assert_eq!(out.pixel(1, 1)?[0], 30);
        // 10, 20, 10, 20 -> (10 + 20) / 2
        assert_eq!(out.pixel(1, 0)?[0], 15);
        Ok(())
    }

    #[test]
    fn test_median_removes_impulse() -> Result<(), ImageError> {
        let mut image = Raster::from_size_pixel(
            ImageSize {
                width: 5,
                height: 5,
            },
            [100, 100, 100, 255],
        )?;
        image.set_pixel(2, 2, [255, 0, 255, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::median_filter(&image, &mut out, 3)?;
        assert!(out
            .as_slice()
            .chunks_exact(4)
            .all(|p| p == [100, 100, 100, 255]));
        Ok(())
    }

    #[test]
    fn test_mean_filter_large_window() -> Result<(), ImageError> {
        // 4200 * 4200 * 255 does not fit in a u32
        let image = Raster::from_size_pixel([1, 1].into(), [255, 128, 0, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::local_filter(&image, &mut out, LocalFilterKind::Mean, 4200)?;
        assert_eq!(out.pixel(0, 0)?, &[255, 128, 0, 255]);
        Ok(())
    }

    #[test]
    fn test_order_filter() -> Result<(), ImageError> {
        let image = ramp_3x3()?;
        let mut out = Raster::from_size_val(image.size(), 0)?;

        super::order_filter(&image, &mut out, 3, 2)?;
        assert_eq!(out.pixel(1, 1)?[0], 20);

        // k is clamped into [1, 9]
        super::order_filter(&image, &mut out, 3, 0)?;
        assert_eq!(out.pixel(1, 1)?[0], 10);
        super::order_filter(&image, &mut out, 3, 100)?;
        assert_eq!(out.pixel(1, 1)?[0], 90);
        Ok(())
    }

    #[test]
    fn test_conservative_smoothing() -> Result<(), ImageError> {
        let mut image = Raster::from_size_pixel(
            ImageSize {
                width: 3,
                height: 3,
            },
            [50, 50, 50, 255],
        )?;
        image.set_pixel(0, 0, [40, 50, 60, 255])?;
        image.set_pixel(1, 1, [200, 0, 55, 255])?;
        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::conservative_smoothing(&image, &mut out, 3)?;

        // neighbors of the center: red 40..50, green 50..50, blue 50..60
        assert_eq!(out.pixel(1, 1)?, &[50, 50, 55, 255]);
        // samples already inside their neighbor range are left as they are
        assert_eq!(out.pixel(2, 2)?, &[50, 50, 50, 255]);

        let mut out = Raster::from_size_val(image.size(), 0)?;
        super::conservative_smoothing(&image, &mut out, 1)?;
        assert_eq!(out, image);
        Ok(())
    }
}
