use std::path::PathBuf;

use pixel_palette::PaletteError;
use thiserror::Error;

/// Failure while decoding one frame of a trace.
///
/// Decode errors are frame-scoped: the frame is discarded and the rest of
/// its input file is skipped, but the batch carries on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid frame header: {0}")]
    Header(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Malformed record on line {line}: {text:?}")]
    MalformedRecord { line: usize, text: String },

    #[error("Run of {run} pixels on line {line} overflows frame ({remaining} pixels left)")]
    RunOverflow {
        line: usize,
        run: u64,
        remaining: usize,
    },

    #[error("Frame truncated: {missing} pixels missing")]
    Truncated { missing: usize },

    #[error("Frame of {width}x{height} pixels does not fit in memory: {source}")]
    FrameTooLarge {
        width: u32,
        height: u32,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while encoding a frame to a raster file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Palette has not been assigned")]
    PaletteNotAssigned,

    #[error("Pixel value {0:#x} is not in the palette")]
    UnknownPixel(u32),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for RenderError {
    fn from(e: png::EncodingError) -> Self {
        match e {
            png::EncodingError::IoError(io) => RenderError::Io(io),
            other => RenderError::PngEncode(other.to_string()),
        }
    }
}

/// Fatal failure that aborts a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to write {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),
}
