//! Probabilistic ordered map from pixel keys to palette entries
//!
//! [`PaletteMap`] is a skip list keyed by `u32` pixel values. Entries live in
//! a single arena and link to their successors by index, one link per level.
//! Level heights are drawn by [`random_level`].

mod level;
mod palette_map;

pub use level::{level_from_bits, random_level, MAX_LEVEL};
pub use palette_map::{ColorEntry, EntryId, Iter, PaletteMap};
