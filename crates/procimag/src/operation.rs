use procimag_image::{ImageError, Raster};
use procimag_imgproc::{
    color::{self, GrayWeights},
    core::{self, ArithmeticOp, LogicOp},
    enhance::{self, BrightnessMode},
    filter::{self, EdgeMode, LaplacianKernel, LaplacianMode, LocalFilterKind},
    flip::{self, FlipDirection},
    histogram, morphology,
    morphology::ContourMode,
    threshold::{self, AdaptiveThresholdParams},
};

/// One engine transform together with its parameters.
///
/// Every variant maps to exactly one pure function of `procimag-imgproc`;
/// [`Operation::apply`] is the single dispatch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Linear-light weighted grayscale.
    Grayscale(GrayWeights),
    /// Per-channel multiplicative gain on R, G and B.
    ChannelGain([f64; 3]),
    /// HSL saturation gain.
    Saturation(f64),
    /// Hue rotation in degrees.
    Hue(f64),
    /// Additive or multiplicative brightness.
    Brightness {
        /// Offset or gain.
        factor: f64,
        /// How the factor is applied.
        mode: BrightnessMode,
    },
    /// Contrast around mid gray.
    Contrast(f64),
    /// Photographic negative.
    Negative,
    /// Global binary threshold.
    Threshold(u8),
    /// Local mean binary threshold.
    AdaptiveThreshold(AdaptiveThresholdParams),
    /// Luma histogram equalization keeping the chroma.
    EqualizeHistogram,
    /// Luma histogram equalization output as gray.
    EqualizeHistogramGray,
    /// Arithmetic with the secondary raster.
    Arithmetic {
        /// The combination.
        op: ArithmeticOp,
        /// Gain of the primary raster.
        kp: f64,
        /// Gain of the secondary raster.
        ks: f64,
    },
    /// Bitwise logic, with the secondary raster unless `Not`.
    Logic(LogicOp),
    /// Neighborhood min, max or mean.
    LocalFilter {
        /// The reduction.
        kind: LocalFilterKind,
        /// Window side length.
        size: usize,
    },
    /// Median filter.
    Median {
        /// Window side length.
        size: usize,
    },
    /// k-th order statistic filter.
    Order {
        /// Window side length.
        size: usize,
        /// 1-based rank.
        k: usize,
    },
    /// Conservative smoothing.
    ConservativeSmoothing {
        /// Window side length.
        size: usize,
    },
    /// Separable gaussian blur.
    GaussianBlur {
        /// Odd kernel size.
        size: usize,
        /// Standard deviation.
        sigma: f64,
    },
    /// Sobel edge detection.
    Sobel(EdgeMode),
    /// Prewitt edge detection.
    Prewitt(EdgeMode),
    /// Laplacian edge detection.
    Laplacian {
        /// 4 or 8 neighbor kernel.
        kernel: LaplacianKernel,
        /// Rectified or signed output.
        mode: LaplacianMode,
    },
    /// Caller supplied 3x3 kernel, row-major.
    CustomKernel([f32; 9]),
    /// 3x3 dilation.
    Dilate,
    /// 3x3 erosion.
    Erode,
    /// Morphological contour.
    Contour(ContourMode),
    /// Erosion then dilation.
    Open,
    /// Dilation then erosion.
    Close,
    /// Mirror the image.
    Flip(FlipDirection),
}

impl Operation {
    /// Whether the operation combines the primary raster with a secondary one.
    pub fn needs_secondary(&self) -> bool {
        match self {
            Operation::Arithmetic { .. } => true,
            Operation::Logic(op) => op.is_binary(),
            _ => false,
        }
    }

    /// Apply the operation to `src` and return the result as a new raster.
    ///
    /// `secondary` must already have the size of `src`; it is only read by
    /// the operations for which [`Operation::needs_secondary`] is true.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::MissingSecondary`] if a dual-raster operation gets
    /// no secondary raster, or the error of the underlying operator.
    ///
    /// # Example
    ///
    /// ```
    /// use procimag::image::{ImageSize, Raster};
    /// use procimag::Operation;
    ///
    /// let image = Raster::from_size_pixel(ImageSize { width: 2, height: 2 }, [10, 20, 30, 255]).unwrap();
    /// let out = Operation::Negative.apply(&image, None).unwrap();
    /// assert_eq!(out.pixel(1, 1).unwrap(), &[245, 235, 225, 255]);
    /// ```
    pub fn apply(&self, src: &Raster, secondary: Option<&Raster>) -> Result<Raster, ImageError> {
        if self.needs_secondary() && secondary.is_none() {
            return Err(ImageError::MissingSecondary);
        }

        // flip builds its own output
        if let Operation::Flip(direction) = *self {
            return flip::flip(src, direction);
        }

        let mut dst = Raster::from_size_val(src.size(), 0)?;
        let out = &mut dst;

        match *self {
            Operation::Grayscale(weights) => color::gray_from_rgb_weighted(src, out, weights)?,
            Operation::ChannelGain(gains) => color::adjust_channel_gain(src, out, gains)?,
            Operation::Saturation(factor) => color::adjust_saturation(src, out, factor)?,
            Operation::Hue(degrees) => color::adjust_hue(src, out, degrees)?,
            Operation::Brightness { factor, mode } => {
                enhance::adjust_brightness(src, out, factor, mode)?
            }
            Operation::Contrast(factor) => enhance::adjust_contrast(src, out, factor)?,
            Operation::Negative => enhance::negative(src, out)?,
            Operation::Threshold(t) => threshold::threshold(src, out, t)?,
            Operation::AdaptiveThreshold(params) => {
                threshold::adaptive_threshold(src, out, params)?
            }
            Operation::EqualizeHistogram => histogram::equalize_histogram(src, out)?,
            Operation::EqualizeHistogramGray => histogram::equalize_histogram_gray(src, out)?,
            Operation::Arithmetic { op, kp, ks } => {
                let secondary = secondary.ok_or(ImageError::MissingSecondary)?;
                core::arithmetic(src, kp, secondary, ks, op, out)?
            }
            Operation::Logic(op) => core::logic(src, secondary, op, out)?,
            Operation::LocalFilter { kind, size } => filter::local_filter(src, out, kind, size)?,
            Operation::Median { size } => filter::median_filter(src, out, size)?,
            Operation::Order { size, k } => filter::order_filter(src, out, size, k)?,
            Operation::ConservativeSmoothing { size } => {
                filter::conservative_smoothing(src, out, size)?
            }
            Operation::GaussianBlur { size, sigma } => {
                filter::gaussian_blur(src, out, size, sigma)?
            }
            Operation::Sobel(mode) => filter::sobel(src, out, mode)?,
            Operation::Prewitt(mode) => filter::prewitt(src, out, mode)?,
            Operation::Laplacian { kernel, mode } => filter::laplacian(src, out, kernel, mode)?,
            Operation::CustomKernel(weights) => filter::custom_kernel(src, out, &weights)?,
            Operation::Dilate => morphology::dilate(src, out)?,
            Operation::Erode => morphology::erode(src, out)?,
            Operation::Contour(mode) => morphology::contour(src, out, mode)?,
            Operation::Open => morphology::open(src, out)?,
            Operation::Close => morphology::close(src, out)?,
            Operation::Flip(_) => {}
        }

        Ok(dst)
    }
}
