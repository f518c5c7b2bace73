/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has zero width or height.
    #[error("Image size must be non-zero, got {0}x{1}")]
    EmptyImage(usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must match have different sizes.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a neighborhood window size is zero.
    #[error("Invalid window size {0}, must be greater than zero")]
    InvalidWindowSize(usize),

    /// Error when a kernel length is zero or not odd.
    #[error("Invalid kernel length {0}, must be odd and greater than zero")]
    InvalidKernelLength(usize),

    /// Error when the gaussian sigma is not strictly positive and finite.
    #[error("Invalid sigma value {0}, must be positive")]
    InvalidSigma(f64),

    /// Error when the histogram bin count is outside 1..=256.
    #[error("Invalid number of histogram bins {0}")]
    InvalidHistogramBins(usize),

    /// Error when a dual-raster operation is invoked without a secondary raster.
    #[error("Operation requires a secondary image")]
    MissingSecondary,
}
