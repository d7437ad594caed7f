//! Level generation for palette map entries

use rand::RngCore;

/// Hard cap on the number of levels an entry may span.
pub const MAX_LEVEL: usize = 32;

/// Derive a level from a bitstream.
///
/// Bits are inspected from the least significant end. Starting at level 1,
/// a set bit stops the walk and a clear bit moves one level up, until
/// [`MAX_LEVEL`] is reached.
///
/// # Example
/// ```
/// use pixel_palette::{level_from_bits, MAX_LEVEL};
///
/// assert_eq!(level_from_bits(0b1), 1);
/// assert_eq!(level_from_bits(0b100), 3);
/// assert_eq!(level_from_bits(0), MAX_LEVEL);
/// ```
#[inline]
pub fn level_from_bits(mut bits: u32) -> usize {
    let mut level = 1;
    while level < MAX_LEVEL {
        if bits & 1 == 1 {
            break;
        }
        bits >>= 1;
        level += 1;
    }
    level
}

/// Draw a level for a new entry.
///
/// Two uniform words are OR-ed together, so every bit is set with
/// probability 3/4. Each level is therefore reached with probability 1/4
/// of the one below it, giving an expected level of about 1.33.
#[inline]
pub fn random_level<R: RngCore + ?Sized>(rng: &mut R) -> usize {
    level_from_bits(rng.next_u32() | rng.next_u32())
}
