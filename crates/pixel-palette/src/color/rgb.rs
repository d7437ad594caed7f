//! 8-bit RGB color type

/// A color with three 8-bit channels.
///
/// This is the resolved color stored in every palette entry and written
/// verbatim by the raster encoders. It carries no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure white, reserved for the lowest pixel key.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Pure black, reserved for the second lowest pixel key.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// # Example
    /// ```
    /// use pixel_palette::Rgb;
    /// assert_eq!(Rgb::new(1, 2, 3).to_bytes(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}
