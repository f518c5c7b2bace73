/// Convert an 8-bit RGB triple to HSL.
///
/// # Returns
///
/// A tuple `(h, s, l)` with the hue in degrees in `[0, 360)` and the
/// saturation and lightness in `[0, 1]`. Achromatic colors have hue and
/// saturation `0`.
///
/// # Example
///
/// ```
/// use procimag_imgproc::color::rgb_to_hsl;
///
/// let (h, s, l) = rgb_to_hsl(255, 0, 0);
/// assert_eq!((h, s, l), (0.0, 1.0, 0.5));
/// ```
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = (delta / (1.0 - (2.0 * l - 1.0).abs())).min(1.0);

    let h = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // ensure h is in the range [0, 360)
    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, l)
}

/// Convert an HSL color to an 8-bit RGB triple.
///
/// The hue wraps around: any finite value, negative ones included, is
/// brought into `[0, 360)` first. Saturation and lightness are clamped to
/// `[0, 1]`.
///
/// # Example
///
/// ```
/// use procimag_imgproc::color::hsl_to_rgb;
///
/// assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0, 255, 0]);
/// assert_eq!(hsl_to_rgb(-240.0, 1.0, 0.5), [0, 255, 0]);
/// ```
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());

    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    [
        crate::saturate_u8((r + m) * 255.0),
        crate::saturate_u8((g + m) * 255.0),
        crate::saturate_u8((b + m) * 255.0),
    ]
}
