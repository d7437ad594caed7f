//! pixel-palette: distinct colors for distinct pixel values
//!
//! This library collects the distinct pixel values seen across a batch of
//! frames and, once all of them are known, gives each one a color that is
//! easy to tell apart from the others.
//!
//! # Quick Start
//!
//! ```
//! use pixel_palette::{assign_colors, PaletteMap, Rgb};
//!
//! let mut map = PaletteMap::new();
//! for pixel in [0x10, 0x00, 0x10, 0x20, 0x30] {
//!     map.find_or_insert(pixel).unwrap();
//! }
//! assert_eq!(map.len(), 4);
//!
//! assign_colors(&mut map);
//! assert_eq!(map.get(0x00).unwrap().color(), Rgb::WHITE);
//! assert_eq!(map.get(0x10).unwrap().color(), Rgb::BLACK);
//! ```
//!
//! # Two Phases
//!
//! The palette is built in two strictly ordered phases:
//!
//! ```text
//! decode frames ──> PaletteMap::find_or_insert   (map grows, colors unset)
//!                          |
//!                   assign_colors                 (once, every entry colored)
//!                          |
//! encode frames <── PaletteMap::get               (read-only lookups)
//! ```
//!
//! Colors are a function of each key's rank in ascending order, so they
//! cannot be chosen while keys are still arriving. Inserting after
//! assignment is not prevented by the map but leaves the new entry black.
//!
//! # The Map
//!
//! [`PaletteMap`] is a skip list. Each entry's level is drawn by
//! [`random_level`], which stops climbing with probability 3/4 per level
//! rather than the classic 1/2. The resulting structure is flatter, with an
//! expected level of 4/3. Entries live in an arena and are linked by index.

pub mod assign;
pub mod color;
pub mod error;
pub mod map;

#[cfg(test)]
mod proptests;

pub use assign::{assign_colors, sweep_hsv};
pub use color::{Hsv, Rgb};
pub use error::PaletteError;
pub use map::{level_from_bits, random_level, ColorEntry, EntryId, Iter, PaletteMap, MAX_LEVEL};
