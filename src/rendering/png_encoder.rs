use std::io::Write;

use pixel_palette::PaletteMap;

use super::resolve_rgb;
use crate::error::RenderError;
use crate::models::Frame;

/// Write an 8-bit RGB PNG without alpha.
pub fn encode_png<W: Write>(
    frame: &Frame,
    palette: &PaletteMap,
    writer: W,
) -> Result<(), RenderError> {
    let rgb = resolve_rgb(frame, palette)?;

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgb)?;
    writer.finish()?;
    Ok(())
}
