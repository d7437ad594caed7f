//! Palette assignment: one color per distinct pixel key
//!
//! Colors depend only on each entry's rank in ascending key order and on
//! the total number of entries, so assignment has to wait until every
//! frame of a batch has been decoded.
//!
//! | Rank | Color |
//! |------|-------|
//! | 0 | white |
//! | 1 | black |
//! | 2.. | hue sweep over `[0, 1)` at full saturation, half value |

use crate::color::{Hsv, Rgb};
use crate::map::PaletteMap;

/// HSV color for the entry of rank `index` among `total` entries.
///
/// The two lowest ranks are reserved for white and black. The remaining
/// `total - 2` entries get evenly spaced hues starting at 0.
///
/// # Example
/// ```
/// use pixel_palette::sweep_hsv;
///
/// assert_eq!(sweep_hsv(0, 6).v, 1.0);
/// assert_eq!(sweep_hsv(1, 6).v, 0.0);
/// assert_eq!(sweep_hsv(4, 6).h, 0.5);
/// ```
pub fn sweep_hsv(index: usize, total: usize) -> Hsv {
    debug_assert!(index < total, "rank {index} out of {total} entries");
    match index {
        0 => Hsv::new(0.0, 0.0, 1.0),
        1 => Hsv::new(0.0, 0.0, 0.0),
        // index >= 2 implies total >= 3, so the denominator is never zero
        i => Hsv::new((i - 2) as f32 / (total - 2) as f32, 1.0, 0.5),
    }
}

/// Color every entry of `map` and mark it assigned.
///
/// Walks the map in ascending key order and stores
/// `Rgb::from(sweep_hsv(rank, map.len()))` in each entry. With two or fewer
/// entries there is nothing to sweep and only the reserved colors are used.
///
/// Returns the number of entries colored.
///
/// # Example
/// ```
/// use pixel_palette::{assign_colors, PaletteMap, Rgb};
///
/// let mut map = PaletteMap::with_seed(1);
/// for key in [7, 3, 5] {
///     map.find_or_insert(key).unwrap();
/// }
/// assert_eq!(assign_colors(&mut map), 3);
///
/// let colors: Vec<Rgb> = map.iter().map(|e| e.color()).collect();
/// assert_eq!(colors, vec![Rgb::WHITE, Rgb::BLACK, Rgb::new(127, 0, 0)]);
/// ```
pub fn assign_colors(map: &mut PaletteMap) -> usize {
    let total = map.len();
    map.for_each_in_order_mut(|rank, entry| {
        entry.set_color(Rgb::from(sweep_hsv(rank, total)));
    });
    map.mark_assigned();
    total
}
