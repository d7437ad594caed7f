use std::io::Write;

use pixel_palette::PaletteMap;

use super::resolve;
use crate::error::RenderError;
use crate::models::Frame;

/// Write a plain-text P3 pixmap: header, then one `R G B` line per pixel.
pub fn encode_ppm<W: Write>(
    frame: &Frame,
    palette: &PaletteMap,
    mut writer: W,
) -> Result<(), RenderError> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;
    for &pixel in frame.pixels() {
        let color = resolve(palette, pixel)?;
        writeln!(writer, "{} {} {}", color.r, color.g, color.b)?;
    }
    writer.flush()?;
    Ok(())
}
