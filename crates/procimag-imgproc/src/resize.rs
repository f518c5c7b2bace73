use procimag_image::{Image, ImageError};

use crate::parallel;

/// Map an output coordinate onto the source grid.
///
/// The output samples are spread evenly over `[0, src_len - 1]`, so the first
/// and last output pixels land on the first and last source pixels.
#[inline]
fn source_index(i: usize, dst_len: usize, src_len: usize) -> usize {
    if dst_len <= 1 {
        return 0;
    }
    let u = i as f32 * (src_len - 1) as f32 / (dst_len - 1) as f32;
    (u.round() as usize).min(src_len - 1)
}

/// Resize an image to the size of `dst` with nearest neighbor interpolation.
///
/// Every channel is copied unchanged from the nearest source pixel. This is
/// how a secondary raster is brought to the dimensions of the primary one
/// before a dual-raster operation.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated at the target size.
///
/// # Example
///
/// ```
/// use procimag_image::{Image, ImageSize};
/// use procimag_imgproc::resize::resize_nearest;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![10, 20]).unwrap();
/// let mut resized = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 2 }, 0).unwrap();
///
/// resize_nearest(&image, &mut resized).unwrap();
/// assert_eq!(resized.as_slice(), &[10, 10, 20, 20, 10, 10, 20, 20]);
/// ```
pub fn resize_nearest<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = (dst.width(), dst.height());

    let x_lut = (0..dst_w)
        .map(|x| source_index(x, dst_w, src_w))
        .collect::<Vec<_>>();

    parallel::par_iter_rows_indexed(dst, |y, row| {
        let sy = source_index(y, dst_h, src_h);
        let src_row = &src.as_slice()[sy * src_w * C..(sy + 1) * src_w * C];
        for (out, &sx) in row.chunks_exact_mut(C).zip(x_lut.iter()) {
            out.copy_from_slice(&src_row[sx * C..(sx + 1) * C]);
        }
    });

    Ok(())
}
