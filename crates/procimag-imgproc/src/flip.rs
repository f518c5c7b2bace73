use procimag_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// The axis a [`flip`] mirrors across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    /// Mirror left to right: `dst_x = width - 1 - src_x`.
    Horizontal,
    /// Mirror top to bottom: `dst_y = height - 1 - src_y`.
    Vertical,
}

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use procimag_image::{Image, ImageSize};
/// use procimag_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 4>::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![0u8; 2 * 3 * 4],
/// )
/// .unwrap();
///
/// let flipped: Image<u8, 4> = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.size().width, 2);
/// assert_eq!(flipped.size().height, 3);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let cols = src.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .for_each(|row| {
            let mut i = 0;
            let mut j = cols - 1;
            while i < j {
                for c in 0..C {
                    row.swap(i * C + c, j * C + c);
                }
                i += 1;
                j -= 1;
            }
        });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let row_len = src.cols() * C;
    let rows = src.rows();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(r, row)| {
            let start = (rows - 1 - r) * row_len;
            row.clone_from_slice(&src_data[start..start + row_len]);
        });

    Ok(dst)
}

/// Flip an image along `direction` into a newly allocated image.
///
/// All channels, alpha included, are copied; no interpolation happens.
///
/// # Errors
///
/// Does not fail for a valid image; the `Result` mirrors the other operators.
pub fn flip<T, const C: usize>(
    src: &Image<T, C>,
    direction: FlipDirection,
) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    match direction {
        FlipDirection::Horizontal => horizontal_flip(src),
        FlipDirection::Vertical => vertical_flip(src),
    }
}
