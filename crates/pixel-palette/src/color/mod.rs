//! Color types used by palette assignment
//!
//! Palette entries carry an 8-bit [`Rgb`] triple. Colors are synthesized in
//! [`Hsv`] space, where evenly spaced hues are easy to produce, and quantized
//! to [`Rgb`] through the `From` conversion.
//!
//! # Example
//!
//! ```
//! use pixel_palette::{Hsv, Rgb};
//!
//! let red = Rgb::from(Hsv::new(0.0, 1.0, 0.5));
//! assert_eq!(red, Rgb::new(127, 0, 0));
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv;
pub use rgb::Rgb;
