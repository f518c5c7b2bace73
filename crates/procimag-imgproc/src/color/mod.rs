mod adjust;
mod gray;
mod hsl;
mod srgb;

pub use adjust::{adjust_channel_gain, adjust_hue, adjust_saturation};
pub use gray::{gray_from_rgb_weighted, gray_from_rgba, luma, GrayWeights, WeightChannel};
pub use hsl::{hsl_to_rgb, rgb_to_hsl};
pub use srgb::{linear_to_srgb, srgb_to_linear};
