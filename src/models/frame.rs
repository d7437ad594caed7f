use pixel_palette::PaletteMap;

use crate::error::DecodeError;

/// Dimensions line of one frame: `<width> <height> <depth>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl FrameHeader {
    /// Validate dimensions and build a header.
    ///
    /// Both dimensions must be non-zero and their product must fit in memory
    /// addressing.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(DecodeError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Number of pixels the records of this frame must cover
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One run-length record: `length` consecutive pixels of value `key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub length: usize,
    pub key: u32,
    /// 1-based line number of the record in its input
    pub line: usize,
}

/// A fully decoded frame: header plus one pixel key per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    pixels: Vec<u32>,
}

impl Frame {
    /// Build a frame from runs, registering every key in `palette`.
    ///
    /// The whole frame is materialized before returning; on error the
    /// partial buffer is dropped. Keys registered before the error stay in
    /// the palette.
    pub fn decode<I>(
        header: FrameHeader,
        runs: I,
        palette: &mut PaletteMap,
    ) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = Result<Run, DecodeError>>,
    {
        let total = header.pixel_count();
        // Headers are untrusted; grow with the records actually read.
        let mut pixels = Vec::with_capacity(total.min(1 << 20));

        for run in runs {
            let run = run?;
            palette.find_or_insert(run.key)?;

            let remaining = total - pixels.len();
            if run.length > remaining {
                return Err(DecodeError::RunOverflow {
                    line: run.line,
                    run: run.length as u64,
                    remaining,
                });
            }
            reserve_pixels(&mut pixels, run.length, &header)?;
            pixels.resize(pixels.len() + run.length, run.key);
        }

        if pixels.len() < total {
            return Err(DecodeError::Truncated {
                missing: total - pixels.len(),
            });
        }

        Ok(Self { header, pixels })
    }

    /// Wrap an existing pixel buffer.
    pub fn from_pixels(header: FrameHeader, pixels: Vec<u32>) -> Result<Self, DecodeError> {
        let total = header.pixel_count();
        if pixels.len() != total {
            return Err(DecodeError::Truncated {
                missing: total.saturating_sub(pixels.len()),
            });
        }
        Ok(Self { header, pixels })
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn depth(&self) -> u32 {
        self.header.depth
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Make room for `additional` pixels without aborting on allocation failure.
fn reserve_pixels(
    pixels: &mut Vec<u32>,
    additional: usize,
    header: &FrameHeader,
) -> Result<(), DecodeError> {
    pixels
        .try_reserve(additional)
        .map_err(|source| DecodeError::FrameTooLarge {
            width: header.width,
            height: header.height,
            source,
        })
}
