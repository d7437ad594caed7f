//! Assertion helpers for tests.

use std::collections::HashSet;
use std::path::Path;

use pretty_assertions::assert_eq;

/// Decoded RGB image
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl Image {
    pub fn distinct_colors(&self) -> HashSet<[u8; 3]> {
        self.pixels.iter().copied().collect()
    }
}

/// Read a PNG file and assert it is 8-bit RGB
pub fn read_png(path: &Path) -> Image {
    let file = std::fs::File::open(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder.read_info().expect("Invalid PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("Invalid PNG data");
    buf.truncate(info.buffer_size());

    assert_eq!(info.color_type, png::ColorType::Rgb, "Expected RGB PNG");
    assert_eq!(info.bit_depth, png::BitDepth::Eight, "Expected 8-bit PNG");

    Image {
        width: info.width,
        height: info.height,
        pixels: buf.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
    }
}

/// Read a plain-text PPM file
pub fn read_ppm(path: &Path) -> Image {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Expected PPM at {}: {e}", path.display()));
    let mut tokens = text.split_whitespace();

    assert_eq!(tokens.next(), Some("P3"), "Expected P3 magic");
    let mut number = || -> u32 {
        tokens
            .next()
            .expect("PPM ended early")
            .parse()
            .expect("PPM token is not a number")
    };
    let width = number();
    let height = number();
    assert_eq!(number(), 255, "Expected maxval 255");

    let mut pixels = Vec::new();
    for _ in 0..width * height {
        pixels.push([number() as u8, number() as u8, number() as u8]);
    }
    assert!(tokens.next().is_none(), "Trailing data after PPM pixels");

    Image {
        width,
        height,
        pixels,
    }
}

/// Assert an image has the expected size and pixels
pub fn assert_pixels(image: &Image, width: u32, height: u32, expected: &[[u8; 3]]) {
    assert_eq!((image.width, image.height), (width, height), "Image size");
    assert_eq!(image.pixels, expected);
}
