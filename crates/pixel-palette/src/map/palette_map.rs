//! Skip-list palette map with arena-owned entries.
//!
//! Every [`ColorEntry`] is stored once in the map's arena and never moves or
//! disappears until the map is dropped. Links between entries are arena
//! indices, so the structure holds no references into itself.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::level::{random_level, MAX_LEVEL};
use crate::color::Rgb;
use crate::error::PaletteError;

/// Handle to an entry of a [`PaletteMap`].
///
/// Handles are stable for the lifetime of the map: looking up the same key
/// twice yields equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    /// Position of the entry in insertion order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One distinct pixel key and its assigned color.
#[derive(Debug, Clone)]
pub struct ColorEntry {
    key: u32,
    color: Rgb,
    // One successor link per level; the length is the entry's level.
    forward: Vec<Option<EntryId>>,
}

impl ColorEntry {
    /// The pixel key this entry stands for.
    #[inline]
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The assigned color. Black until palette assignment has run.
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Number of levels this entry is linked into, in `1..=MAX_LEVEL`.
    #[inline]
    pub fn level(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

/// Ordered map from `u32` pixel keys to palette entries.
///
/// The map deduplicates pixel values as frames are decoded. Its only
/// mutating operation is [`find_or_insert()`](PaletteMap::find_or_insert);
/// entries are never removed.
///
/// # Example
///
/// ```
/// use pixel_palette::PaletteMap;
///
/// let mut map = PaletteMap::with_seed(7);
/// let a = map.find_or_insert(30).unwrap();
/// let b = map.find_or_insert(10).unwrap();
/// assert_eq!(map.find_or_insert(30).unwrap(), a);
/// assert_ne!(a, b);
///
/// let keys: Vec<u32> = map.iter().map(|e| e.key()).collect();
/// assert_eq!(keys, vec![10, 30]);
/// ```
#[derive(Debug)]
pub struct PaletteMap {
    heads: [Option<EntryId>; MAX_LEVEL],
    entries: Vec<ColorEntry>,
    // Highest level any entry reaches; heads at or above it are empty.
    height: usize,
    assigned: bool,
    rng: StdRng,
}

impl PaletteMap {
    /// Create an empty map whose level generator is seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty map with a reproducible level generator.
    ///
    /// The seed only affects the internal shape of the map, never the
    /// ordering or the colors it produces.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            heads: [None; MAX_LEVEL],
            entries: Vec::new(),
            height: 0,
            assigned: false,
            rng,
        }
    }

    /// Number of distinct pixel keys in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key has been registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels currently in use.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true once palette assignment has colored every entry.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Access an entry by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different map.
    #[inline]
    pub fn entry(&self, id: EntryId) -> &ColorEntry {
        &self.entries[id.0]
    }

    /// Successor of `cursor` at `level`; `None` as cursor means the head.
    #[inline]
    fn next_at(&self, cursor: Option<EntryId>, level: usize) -> Option<EntryId> {
        match cursor {
            None => self.heads[level],
            Some(id) => self.entries[id.0].forward[level],
        }
    }

    #[inline]
    fn set_next(&mut self, cursor: Option<EntryId>, level: usize, next: Option<EntryId>) {
        match cursor {
            None => self.heads[level] = next,
            Some(id) => self.entries[id.0].forward[level] = next,
        }
    }

    /// Look up `key` without inserting it.
    pub fn find(&self, key: u32) -> Option<EntryId> {
        let mut cursor = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_at(cursor, level) {
                match self.entries[next.0].key.cmp(&key) {
                    Ordering::Less => cursor = Some(next),
                    Ordering::Equal => return Some(next),
                    Ordering::Greater => break,
                }
            }
        }
        None
    }

    /// Look up the entry for `key` without inserting it.
    ///
    /// Raster encoders resolve pixels through this once the palette is
    /// assigned, so encoding can never grow the map.
    #[inline]
    pub fn get(&self, key: u32) -> Option<&ColorEntry> {
        self.find(key).map(|id| self.entry(id))
    }

    /// Return the entry for `key`, creating it if the key is new.
    ///
    /// A new entry gets a freshly drawn level and a zeroed color and is
    /// spliced in after its predecessor on every level it spans. Existing
    /// keys are returned without touching the map.
    ///
    /// The map does not refuse insertion after
    /// [`assign_colors()`](crate::assign_colors) has run; such an entry
    /// would stay black. Callers must only look up known keys at that point.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::AllocationFailed`] if memory for the new
    /// entry cannot be reserved. The map is unchanged in that case.
    pub fn find_or_insert(&mut self, key: u32) -> Result<EntryId, PaletteError> {
        let mut update: [Option<EntryId>; MAX_LEVEL] = [None; MAX_LEVEL];
        let mut cursor = None;

        for level in (0..self.height).rev() {
            while let Some(next) = self.next_at(cursor, level) {
                match self.entries[next.0].key.cmp(&key) {
                    Ordering::Less => cursor = Some(next),
                    Ordering::Equal => return Ok(next),
                    Ordering::Greater => break,
                }
            }
            update[level] = cursor;
        }

        let level = random_level(&mut self.rng);
        let count = self.entries.len();
        self.entries
            .try_reserve(1)
            .map_err(|e| PaletteError::allocation(count, e))?;
        let mut forward = Vec::new();
        forward
            .try_reserve_exact(level)
            .map_err(|e| PaletteError::allocation(count, e))?;

        let id = EntryId(count);
        for (l, &pred) in update.iter().enumerate().take(level) {
            forward.push(self.next_at(pred, l));
        }
        self.entries.push(ColorEntry {
            key,
            color: Rgb::default(),
            forward,
        });
        for (l, &pred) in update.iter().enumerate().take(level) {
            self.set_next(pred, l, Some(id));
        }
        self.height = self.height.max(level);

        Ok(id)
    }

    /// Iterate all entries in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.level_iter(0)
    }

    /// Iterate the entries linked into one level, in ascending key order.
    ///
    /// # Panics
    ///
    /// Panics if `level >= MAX_LEVEL`.
    pub fn level_iter(&self, level: usize) -> Iter<'_> {
        Iter {
            map: self,
            level,
            cursor: self.heads[level],
        }
    }

    /// Visit every entry mutably in ascending key order with its rank.
    pub(crate) fn for_each_in_order_mut(&mut self, mut f: impl FnMut(usize, &mut ColorEntry)) {
        let mut cursor = self.heads[0];
        let mut rank = 0;
        while let Some(id) = cursor {
            let entry = &mut self.entries[id.0];
            f(rank, entry);
            cursor = entry.forward[0];
            rank += 1;
        }
    }

    pub(crate) fn mark_assigned(&mut self) {
        self.assigned = true;
    }
}

impl Default for PaletteMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PaletteMap {
    type Item = &'a ColorEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of one map level.
pub struct Iter<'a> {
    map: &'a PaletteMap,
    level: usize,
    cursor: Option<EntryId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ColorEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = &self.map.entries[id.0];
        self.cursor = entry.forward[self.level];
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &PaletteMap) -> Vec<u32> {
        map.iter().map(|e| e.key()).collect()
    }

    #[test]
    fn test_empty_map() {
        let map = PaletteMap::with_seed(1);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
        assert!(map.get(0).is_none());
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_insert_returns_same_handle() {
        let mut map = PaletteMap::with_seed(2);
        let first = map.find_or_insert(0xdead_beef).unwrap();
        let second = map.find_or_insert(0xdead_beef).unwrap();
        assert_eq!(first, second);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut map = PaletteMap::with_seed(3);
        for key in [50, 10, 40, 20, 30, 10, 50, u32::MAX, 0] {
            map.find_or_insert(key).unwrap();
        }
        assert_eq!(keys(&map), vec![0, 10, 20, 30, 40, 50, u32::MAX]);
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn test_new_entries_are_uncolored() {
        let mut map = PaletteMap::with_seed(4);
        let id = map.find_or_insert(9).unwrap();
        assert_eq!(map.entry(id).color(), Rgb::BLACK);
        assert_eq!(map.entry(id).key(), 9);
        assert!(!map.is_assigned());
    }

    #[test]
    fn test_get_does_not_insert() {
        let mut map = PaletteMap::with_seed(5);
        map.find_or_insert(3).unwrap();
        assert!(map.get(4).is_none());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(3).map(|e| e.key()), Some(3));
    }

    #[test]
    fn test_find_matches_find_or_insert() {
        let mut map = PaletteMap::with_seed(6);
        let ids: Vec<EntryId> = (0..200u32)
            .map(|k| map.find_or_insert(k * 7 % 211).unwrap())
            .collect();
        for (k, id) in (0..200u32).zip(ids) {
            assert_eq!(map.find(k * 7 % 211), Some(id));
        }
    }

    #[test]
    fn test_levels_are_sorted_subsequences() {
        let mut map = PaletteMap::with_seed(7);
        for k in (0..2_000u32).rev() {
            map.find_or_insert(k.wrapping_mul(2_654_435_761)).unwrap();
        }

        for level in 0..MAX_LEVEL {
            let upper: Vec<u32> = map.level_iter(level).map(|e| e.key()).collect();
            assert!(upper.windows(2).all(|w| w[0] < w[1]), "level {level} unsorted");
            if level > 0 {
                let lower: Vec<u32> = map.level_iter(level - 1).map(|e| e.key()).collect();
                let mut it = lower.iter();
                for key in &upper {
                    assert!(it.any(|k| k == key), "level {level} key {key} missing below");
                }
            }
            if level >= map.height() {
                assert!(upper.is_empty(), "level {level} above height populated");
            }
        }
    }

    #[test]
    fn test_level_membership_matches_entry_level() {
        let mut map = PaletteMap::with_seed(8);
        for k in 0..500u32 {
            map.find_or_insert(k).unwrap();
        }
        for level in 0..map.height() {
            for entry in map.level_iter(level) {
                assert!(entry.level() > level);
            }
            let expected = map.iter().filter(|e| e.level() > level).count();
            assert_eq!(map.level_iter(level).count(), expected);
        }
    }

    #[test]
    fn test_into_iterator() {
        let mut map = PaletteMap::with_seed(9);
        map.find_or_insert(2).unwrap();
        map.find_or_insert(1).unwrap();
        let collected: Vec<u32> = (&map).into_iter().map(ColorEntry::key).collect();
        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn test_entry_id_index_is_insertion_order() {
        let mut map = PaletteMap::with_seed(10);
        let a = map.find_or_insert(100).unwrap();
        let b = map.find_or_insert(1).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }
}
