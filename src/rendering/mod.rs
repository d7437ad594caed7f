//! Raster output for decoded frames
//!
//! Every encoder resolves pixels through [`PaletteMap::get`], never through
//! `find_or_insert`, so writing a frame cannot add entries to a palette that
//! has already been assigned.

mod png_encoder;
mod ppm_encoder;

use std::io::Write;

use pixel_palette::{PaletteMap, Rgb};
use serde::Deserialize;

use crate::error::RenderError;
use crate::models::Frame;

pub use png_encoder::encode_png;
pub use ppm_encoder::encode_ppm;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// Compressed 8-bit RGB PNG
    #[default]
    Png,
    /// Plain-text P3 pixmap
    Ppm,
}

impl RasterFormat {
    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Ppm => "ppm",
        }
    }
}

/// Encode `frame` in `format`, resolving colors through `palette`.
pub fn encode_frame<W: Write>(
    format: RasterFormat,
    frame: &Frame,
    palette: &PaletteMap,
    writer: W,
) -> Result<(), RenderError> {
    if !palette.is_assigned() {
        return Err(RenderError::PaletteNotAssigned);
    }
    match format {
        RasterFormat::Png => encode_png(frame, palette, writer),
        RasterFormat::Ppm => encode_ppm(frame, palette, writer),
    }
}

/// Look up the assigned color of one pixel.
fn resolve(palette: &PaletteMap, pixel: u32) -> Result<Rgb, RenderError> {
    palette
        .get(pixel)
        .map(|entry| entry.color())
        .ok_or(RenderError::UnknownPixel(pixel))
}

/// Resolve a whole frame to `[R, G, B, R, G, B, ...]` bytes, row-major.
pub fn resolve_rgb(frame: &Frame, palette: &PaletteMap) -> Result<Vec<u8>, RenderError> {
    let mut rgb = Vec::with_capacity(frame.pixels().len() * 3);
    for &pixel in frame.pixels() {
        rgb.extend_from_slice(&resolve(palette, pixel)?.to_bytes());
    }
    Ok(rgb)
}
