use procimag_image::{Image, ImageError};
use rayon::prelude::*;

/// Trait for floating point casting
pub trait FloatConversion {
    /// Convert the type to f32
    fn to_f32(&self) -> f32;
    /// Convert the type from f32
    fn from_f32(val: f32) -> Self;
}

impl FloatConversion for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FloatConversion for u8 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    // rounds to nearest; this is the only rounding step of a separable pass
    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter {
    kernel_x: Vec<f32>,
    kernel_y: Vec<f32>,
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl SeparableFilter {
    /// Create a new separable filter with the given kernels.
    ///
    /// # Arguments
    ///
    /// * `kernel_x` - The horizontal convolution kernel
    /// * `kernel_y` - The vertical convolution kernel
    fn new(kernel_x: &[f32], kernel_y: &[f32]) -> Self {
        let half_x = kernel_x.len() / 2;
        let half_y = kernel_y.len() / 2;

        let offsets_x = (0..kernel_x.len())
            .map(|i| i as isize - half_x as isize)
            .collect();

        let offsets_y = (0..kernel_y.len())
            .map(|i| i as isize - half_y as isize)
            .collect();

        Self {
            kernel_x: kernel_x.to_vec(),
            kernel_y: kernel_y.to_vec(),
            offsets_x,
            offsets_y,
        }
    }

    /// Apply the filter to an image.
    ///
    /// Performs horizontal filtering into a floating point buffer, then
    /// vertical filtering from that buffer into `dst`. The vertical pass only
    /// starts once the horizontal pass has completed for every row.
    fn apply<T, const C: usize>(&self, src: &Image<T, C>, dst: &mut Image<T, C>)
    where
        T: FloatConversion + Send + Sync,
    {
        let rows = src.rows();
        let cols = src.cols();
        let last_row = rows as isize - 1;
        let last_col = cols as isize - 1;

        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // Horizontal
        temp.par_chunks_mut(cols * C)
            .enumerate()
            .for_each(|(r, row_temp)| {
                let row_offset = r * cols * C;

                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                        let x = (c as isize + off).clamp(0, last_col) as usize;
                        let idx = row_offset + x * C;
                        for (ch, acc_val) in acc.iter_mut().enumerate() {
                            *acc_val += src_data[idx + ch].to_f32() * k;
                        }
                    }

                    row_temp[c * C..(c + 1) * C].copy_from_slice(&acc);
                }
            });

        // Vertical
        let temp = &temp;
        dst.as_slice_mut()
            .par_chunks_mut(cols * C)
            .enumerate()
            .for_each(|(r, row_dst)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                        let y = (r as isize + off).clamp(0, last_row) as usize;
                        let idx = y * cols * C + c * C;
                        for (ch, acc_val) in acc.iter_mut().enumerate() {
                            *acc_val += temp[idx + ch] * k;
                        }
                    }

                    for (ch, &acc_val) in acc.iter().enumerate() {
                        row_dst[c * C + ch] = T::from_f32(acc_val);
                    }
                }
            });
    }
}

/// Apply a separable filter to an image.
///
/// Out-of-bounds taps replicate the nearest edge pixel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// # Errors
///
/// Returns an error if a kernel is empty or the sizes of `src` and `dst` differ.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError>
where
    T: FloatConversion + Send + Sync,
{
    if kernel_x.is_empty() {
        return Err(ImageError::InvalidKernelLength(kernel_x.len()));
    }

    if kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(kernel_y.len()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter::new(kernel_x, kernel_y);
    filter.apply(src, dst);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use procimag_image::ImageSize;

    #[test]
    fn test_separable_filter_identity() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let img = Image::<u8, 1>::new(size, vec![1, 2, 3, 4, 5, 6])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        separable_filter(&img, &mut dst, &[0.0, 1.0, 0.0], &[1.0])?;
        assert_eq!(dst.as_slice(), img.as_slice());
        Ok(())
    }

    #[test]
    fn test_separable_filter_clamps_edges() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let img = Image::<f32, 1>::from_size_val(size, 9.0)?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        // with edge replication a constant image stays constant, borders included
        let kernel = [0.25, 0.5, 0.25];
        separable_filter(&img, &mut dst, &kernel, &kernel)?;
        assert!(dst.as_slice().iter().all(|&v| (v - 9.0).abs() < 1e-5));
        Ok(())
    }

    #[test]
    fn test_separable_filter_horizontal_then_vertical() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        #[rustfmt::skip]
        let img = Image::<f32, 1>::new(
            size,
            vec![
                0.0, 0.0, 0.0,
                0.0, 9.0, 0.0,
                0.0, 0.0, 0.0,
            ],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        let kernel = [1.0 / 3.0; 3];
        separable_filter(&img, &mut dst, &kernel, &kernel)?;
        assert!(dst.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-5));
        Ok(())
    }

    #[test]
    fn test_separable_filter_rejects_empty_kernel() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let mut dst = img.clone();
        assert_eq!(
            separable_filter(&img, &mut dst, &[], &[1.0]),
            Err(ImageError::InvalidKernelLength(0))
        );
        Ok(())
    }
}
