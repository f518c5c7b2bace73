use procimag_image::{Image, ImageError, Raster};

use crate::parallel;

use super::srgb::{linear_to_srgb, srgb_to_linear_lut};

/// Define the RGB weights for the BT.601 luma conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Compute the BT.601 luma of an RGB(A) pixel.
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
#[inline]
pub fn luma(pixel: &[u8]) -> f32 {
    (RW * pixel[0] as f64 + GW * pixel[1] as f64 + BW * pixel[2] as f64) as f32
}

/// Convert an RGBA raster to a single channel BT.601 luma plane.
///
/// The plane keeps the full floating point precision; no rounding happens.
///
/// # Arguments
///
/// * `src` - The input RGBA raster.
/// * `dst` - The output luma plane.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use procimag_image::{Image, ImageSize, Raster};
/// use procimag_imgproc::color::gray_from_rgba;
///
/// let image = Raster::from_size_pixel(
///     ImageSize { width: 4, height: 5 },
///     [255, 255, 255, 255],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_rgba(&image, &mut gray).unwrap();
/// assert!((gray.as_slice()[0] - 255.0).abs() < 1e-3);
/// ```
pub fn gray_from_rgba(src: &Raster, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luma(src_pixel);
    });

    Ok(())
}

/// The color channel addressed by a weight update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightChannel {
    /// The red weight.
    Red,
    /// The green weight.
    Green,
    /// The blue weight.
    Blue,
}

/// Channel weights for the linear-light grayscale conversion.
///
/// The conversion itself accepts any triple; keeping the weights summing to
/// one is up to the caller, who can use [`GrayWeights::rebalance`] and
/// [`GrayWeights::is_normalized`] for that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayWeights {
    /// Weight of the red channel.
    pub r: f64,
    /// Weight of the green channel.
    pub g: f64,
    /// Weight of the blue channel.
    pub b: f64,
}

impl Default for GrayWeights {
    fn default() -> Self {
        Self::BT601
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

impl GrayWeights {
    /// The BT.601 luma weights.
    pub const BT601: GrayWeights = GrayWeights {
        r: RW,
        g: GW,
        b: BW,
    };

    /// Create a new set of weights.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three weights.
    pub fn sum(&self) -> f64 {
        self.r + self.g + self.b
    }

    /// Whether the weights stay within a unit sum, allowing for 3-decimal
    /// rounding slack.
    pub fn is_normalized(&self) -> bool {
        self.sum() <= 1.001
    }

    fn get(&self, channel: WeightChannel) -> f64 {
        match channel {
            WeightChannel::Red => self.r,
            WeightChannel::Green => self.g,
            WeightChannel::Blue => self.b,
        }
    }

    fn get_mut(&mut self, channel: WeightChannel) -> &mut f64 {
        match channel {
            WeightChannel::Red => &mut self.r,
            WeightChannel::Green => &mut self.g,
            WeightChannel::Blue => &mut self.b,
        }
    }

    /// Set one weight and redistribute the remainder over the other two.
    ///
    /// The new value is clamped to `[0, 1]`. The other two weights are scaled
    /// proportionally so the three sum to one, or split evenly when both were
    /// zero. Every weight is rounded to three decimals and any leftover
    /// rounding error is folded into the largest weight.
    ///
    /// # Example
    ///
    /// ```
    /// use procimag_imgproc::color::{GrayWeights, WeightChannel};
    ///
    /// let w = GrayWeights::new(1.0, 0.0, 0.0).rebalance(WeightChannel::Red, 0.5);
    /// assert_eq!(w, GrayWeights::new(0.5, 0.25, 0.25));
    /// ```
    pub fn rebalance(self, channel: WeightChannel, value: f64) -> Self {
        let mut weights = self;
        let value = value.clamp(0.0, 1.0);
        *weights.get_mut(channel) = value;

        let others = match channel {
            WeightChannel::Red => [WeightChannel::Green, WeightChannel::Blue],
            WeightChannel::Green => [WeightChannel::Red, WeightChannel::Blue],
            WeightChannel::Blue => [WeightChannel::Red, WeightChannel::Green],
        };

        let remaining = (1.0 - value).clamp(0.0, 1.0);
        let old0 = weights.get(others[0]);
        let old1 = weights.get(others[1]);
        let sum_old = old0 + old1;

        if sum_old == 0.0 {
            *weights.get_mut(others[0]) = remaining / 2.0;
            *weights.get_mut(others[1]) = remaining / 2.0;
        } else {
            let k = remaining / sum_old;
            *weights.get_mut(others[0]) = old0 * k;
            *weights.get_mut(others[1]) = old1 * k;
        }

        weights.r = round3(weights.r);
        weights.g = round3(weights.g);
        weights.b = round3(weights.b);

        let diff = round3(1.0 - weights.sum());
        if diff != 0.0 {
            // first maximal weight wins ties, in r, g, b order
            let largest = [WeightChannel::Red, WeightChannel::Green, WeightChannel::Blue]
                .into_iter()
                .fold(WeightChannel::Red, |best, c| {
                    if weights.get(c) > weights.get(best) {
                        c
                    } else {
                        best
                    }
                });
            let w = weights.get_mut(largest);
            *w = round3((*w + diff).clamp(0.0, 1.0));
        }

        weights
    }
}

/// Convert an RGBA raster to grayscale by weighting the channels in linear light.
///
/// Each sample is decoded to linear light, combined as
/// `Y = wr * R + wg * G + wb * B`, encoded back to sRGB and written to all
/// three color channels. Alpha is preserved.
///
/// # Arguments
///
/// * `src` - The input RGBA raster.
/// * `dst` - The output RGBA raster.
/// * `weights` - The channel weights, not required to sum to one.
///
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgb_weighted(
    src: &Raster,
    dst: &mut Raster,
    weights: GrayWeights,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let lut = srgb_to_linear_lut();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = weights.r * lut[src_pixel[0] as usize]
            + weights.g * lut[src_pixel[1] as usize]
            + weights.b * lut[src_pixel[2] as usize];
        let v = linear_to_srgb(y);
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}
