//! Text trace decoder
//!
//! A trace holds any number of frames back to back. Each frame is a header
//! line `<width> <height> <depth>` in decimal, followed by run-length
//! records in hex, one per line: `<run>,<pixel>` or a bare `<pixel>`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pixel_palette::PaletteMap;

use crate::error::DecodeError;
use crate::models::{Frame, FrameHeader, Run};

/// Reads frames one after another from a trace.
pub struct FrameDecoder<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl FrameDecoder<BufReader<File>> {
    /// Open a trace file for decoding.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> FrameDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next line into the buffer. Returns false at end of input.
    fn read_line(&mut self) -> Result<bool, DecodeError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }

    /// Parse the next frame header.
    ///
    /// The three fields may be spread over several lines. Returns `None` if
    /// the input ends before any field is found.
    pub fn next_header(&mut self) -> Result<Option<FrameHeader>, DecodeError> {
        let mut fields: Vec<u32> = Vec::with_capacity(3);

        while fields.len() < 3 {
            if !self.read_line()? {
                if fields.is_empty() {
                    return Ok(None);
                }
                return Err(DecodeError::Header(format!(
                    "expected 3 fields, found {} before end of input",
                    fields.len()
                )));
            }
            for token in self.buf.split_whitespace() {
                if fields.len() == 3 {
                    return Err(DecodeError::Header(format!(
                        "unexpected field {token:?} on line {}",
                        self.line
                    )));
                }
                let value = token.parse::<u32>().map_err(|_| {
                    DecodeError::Header(format!("invalid field {token:?} on line {}", self.line))
                })?;
                fields.push(value);
            }
        }

        FrameHeader::new(fields[0], fields[1], fields[2]).map(Some)
    }

    /// Lazily read the records of the frame described by `header`.
    ///
    /// The iterator stops after the record that completes or overruns the
    /// frame, or after the first error. Overruns are left to
    /// [`Frame::decode`], which registers the record's key first.
    pub fn runs(&mut self, header: &FrameHeader) -> Runs<'_, R> {
        Runs {
            decoder: self,
            remaining: header.pixel_count(),
            failed: false,
        }
    }

    /// Decode the next whole frame, registering its pixel values in
    /// `palette`. Returns `None` at end of input.
    pub fn next_frame(&mut self, palette: &mut PaletteMap) -> Result<Option<Frame>, DecodeError> {
        let Some(header) = self.next_header()? else {
            return Ok(None);
        };
        let runs = self.runs(&header);
        Frame::decode(header, runs, palette).map(Some)
    }
}

/// Iterator over the run-length records of one frame.
pub struct Runs<'a, R> {
    decoder: &'a mut FrameDecoder<R>,
    remaining: usize,
    failed: bool,
}

impl<R: BufRead> Iterator for Runs<'_, R> {
    type Item = Result<Run, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        let result = self.read_run();
        match &result {
            // An overlong run ends the frame; Frame::decode reports it after
            // registering the key.
            Ok(run) => self.remaining = self.remaining.saturating_sub(run.length),
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}

impl<R: BufRead> Runs<'_, R> {
    fn read_run(&mut self) -> Result<Run, DecodeError> {
        if !self.decoder.read_line()? {
            return Err(DecodeError::Truncated {
                missing: self.remaining,
            });
        }

        let line = self.decoder.line;
        let text = self.decoder.buf.trim();
        let (length, key) = parse_record(text).ok_or_else(|| DecodeError::MalformedRecord {
            line,
            text: text.to_string(),
        })?;

        Ok(Run {
            length: length as usize,
            key,
            line,
        })
    }
}

/// Parse a hex number with an optional `0x` prefix.
fn parse_hex(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Parse `<run>,<pixel>` or `<pixel>` into `(run, pixel)`.
fn parse_record(text: &str) -> Option<(u32, u32)> {
    match text.split_once(',') {
        Some((run, pixel)) => Some((parse_hex(run)?, parse_hex(pixel)?)),
        None => Some((1, parse_hex(text)?)),
    }
}
