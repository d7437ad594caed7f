//! Batch pipeline: decode every frame, assign the palette once, encode.
//!
//! Phases never overlap. With [`PaletteScope::Batch`] all frames of all
//! inputs are decoded into one shared palette before any color is chosen,
//! so the same pixel value gets the same color in every output file. With
//! [`PaletteScope::Frame`] each frame is decoded, colored and written on its
//! own and its palette is dropped right after.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pixel_palette::{assign_colors, sweep_hsv, PaletteMap};

use super::decoder::FrameDecoder;
use super::naming::output_path;
use crate::error::{BatchError, DecodeError, RenderError};
use crate::models::{AppConfig, Frame, PaletteScope};
use crate::rendering::encode_frame;

/// Counters reported at the end of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Inputs opened successfully
    pub files_read: usize,
    /// Inputs that could not be opened
    pub files_skipped: usize,
    /// Frames decoded without error
    pub frames_decoded: usize,
    /// Frames that failed to decode (each ends its input)
    pub frames_failed: usize,
    /// Output files written
    pub frames_written: usize,
    /// Output files that could not be created
    pub outputs_skipped: usize,
    /// Palette entries colored, summed over all palettes
    pub colors: usize,
}

/// A decoded frame waiting for the palette to be assigned
struct PendingFrame {
    output: PathBuf,
    frame: Frame,
}

pub struct Batch {
    config: AppConfig,
}

impl Batch {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Process `inputs` in order.
    ///
    /// Unreadable inputs, undecodable frames and uncreatable output files
    /// are logged and skipped. Encoder failures and palette allocation
    /// failures abort the batch.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<BatchSummary, BatchError> {
        if let Some(dir) = &self.config.output_dir {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(dir = %dir.display(), %e, "Failed to create output directory");
            }
        }

        let summary = match self.config.palette_scope {
            PaletteScope::Batch => self.run_shared(inputs)?,
            PaletteScope::Frame => self.run_per_frame(inputs)?,
        };

        tracing::info!(
            files = summary.files_read,
            frames = summary.frames_decoded,
            written = summary.frames_written,
            colors = summary.colors,
            "Batch complete"
        );
        Ok(summary)
    }

    fn new_palette(&self) -> PaletteMap {
        match self.config.seed {
            Some(seed) => PaletteMap::with_seed(seed),
            None => PaletteMap::new(),
        }
    }

    fn output_for(&self, input: &Path, index: usize) -> PathBuf {
        output_path(
            input,
            index,
            self.config.format,
            self.config.output_dir.as_deref(),
        )
    }

    fn open_input(
        &self,
        input: &Path,
        summary: &mut BatchSummary,
    ) -> Option<FrameDecoder<BufReader<File>>> {
        match FrameDecoder::open(input) {
            Ok(decoder) => {
                summary.files_read += 1;
                tracing::debug!(path = %input.display(), "Reading input");
                Some(decoder)
            }
            Err(e) => {
                summary.files_skipped += 1;
                tracing::warn!(path = %input.display(), %e, "Failed to open input, skipping");
                None
            }
        }
    }

    /// Decode the next frame of an input. `None` ends the input, either at
    /// end of file or after a frame-scoped error.
    fn decode_next(
        decoder: &mut FrameDecoder<BufReader<File>>,
        palette: &mut PaletteMap,
        input: &Path,
        index: usize,
        summary: &mut BatchSummary,
    ) -> Result<Option<Frame>, BatchError> {
        match decoder.next_frame(palette) {
            Ok(Some(frame)) => {
                summary.frames_decoded += 1;
                tracing::debug!(
                    path = %input.display(),
                    frame = index,
                    width = frame.width(),
                    height = frame.height(),
                    depth = frame.depth(),
                    "Decoded frame"
                );
                Ok(Some(frame))
            }
            Ok(None) => Ok(None),
            Err(DecodeError::Palette(e)) => Err(e.into()),
            Err(e) => {
                summary.frames_failed += 1;
                tracing::warn!(
                    path = %input.display(),
                    frame = index,
                    line = decoder.line(),
                    %e,
                    "Failed to decode frame, skipping rest of input"
                );
                Ok(None)
            }
        }
    }

    fn run_shared(&self, inputs: &[PathBuf]) -> Result<BatchSummary, BatchError> {
        let mut summary = BatchSummary::default();
        let mut palette = self.new_palette();
        let mut pending = Vec::new();

        for input in inputs {
            let Some(mut decoder) = self.open_input(input, &mut summary) else {
                continue;
            };
            let mut index = 0;
            while let Some(frame) =
                Self::decode_next(&mut decoder, &mut palette, input, index, &mut summary)?
            {
                pending.push(PendingFrame {
                    output: self.output_for(input, index),
                    frame,
                });
                index += 1;
            }
        }

        summary.colors += assign_palette(&mut palette);

        for PendingFrame { output, frame } in &pending {
            self.write_frame(output, frame, &palette, &mut summary)?;
        }
        Ok(summary)
    }

    fn run_per_frame(&self, inputs: &[PathBuf]) -> Result<BatchSummary, BatchError> {
        let mut summary = BatchSummary::default();

        for input in inputs {
            let Some(mut decoder) = self.open_input(input, &mut summary) else {
                continue;
            };
            let mut index = 0;
            loop {
                let mut palette = self.new_palette();
                let Some(frame) =
                    Self::decode_next(&mut decoder, &mut palette, input, index, &mut summary)?
                else {
                    break;
                };
                summary.colors += assign_palette(&mut palette);
                let output = self.output_for(input, index);
                self.write_frame(&output, &frame, &palette, &mut summary)?;
                index += 1;
            }
        }
        Ok(summary)
    }

    fn write_frame(
        &self,
        output: &Path,
        frame: &Frame,
        palette: &PaletteMap,
        summary: &mut BatchSummary,
    ) -> Result<(), BatchError> {
        let file = match File::create(output) {
            Ok(file) => file,
            Err(e) => {
                summary.outputs_skipped += 1;
                tracing::warn!(path = %output.display(), %e, "Failed to create output, skipping");
                return Ok(());
            }
        };

        let mut writer = BufWriter::new(file);
        encode_frame(self.config.format, frame, palette, &mut writer)
            .and_then(|()| writer.flush().map_err(RenderError::from))
            .map_err(|source| BatchError::Render {
                path: output.to_path_buf(),
                source,
            })?;

        summary.frames_written += 1;
        tracing::info!(path = %output.display(), "Wrote frame");
        Ok(())
    }
}

/// Color every palette entry and log the result.
fn assign_palette(palette: &mut PaletteMap) -> usize {
    let total = assign_colors(palette);
    tracing::info!(colors = total, "Assigned palette");
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return total;
    }
    for (rank, entry) in palette.iter().enumerate() {
        let hsv = sweep_hsv(rank, total);
        let rgb = entry.color();
        tracing::debug!(
            pixel = %format!("{:#x}", entry.key()),
            h = hsv.h,
            s = hsv.s,
            v = hsv.v,
            r = rgb.r,
            g = rgb.g,
            b = rgb.b,
            "Palette entry"
        );
    }
    total
}
