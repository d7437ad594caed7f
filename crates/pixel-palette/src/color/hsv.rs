//! HSV color type and conversion to 8-bit RGB

use super::rgb::Rgb;

/// A color in hue/saturation/value form.
///
/// All three components are in `0.0..=1.0`. A hue of 1.0 wraps around to
/// the same color as 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of the full color wheel
    pub h: f32,
    /// Saturation (0.0 is grey)
    pub s: f32,
    /// Value (0.0 is black)
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color.
    #[inline]
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// Quantize a channel in `0.0..=1.0` to 8 bits, rounding down.
#[inline]
fn quantize(channel: f32) -> u8 {
    (channel * 255.0).floor().clamp(0.0, 255.0) as u8
}

impl From<Hsv> for Rgb {
    /// Six-sector HSV to RGB transform.
    ///
    /// The hue is scaled into `[0, 6)`; its integer part selects the sector
    /// and the fractional part interpolates within it. Channels are
    /// quantized with `floor(c * 255)`.
    fn from(hsv: Hsv) -> Self {
        let Hsv { h, s, v } = hsv;

        let h6 = (h * 6.0).rem_euclid(6.0);
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            5 => (v, p, q),
            _ => (v, t, p),
        };

        Rgb::new(quantize(r), quantize(g), quantize(b))
    }
}
