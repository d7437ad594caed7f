//! Error types for palette map operations

use std::collections::TryReserveError;
use std::fmt;

/// Error type for palette map growth.
///
/// The map never fails on lookups; the only failure is running out of memory
/// while registering a new pixel key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Memory for a new entry could not be reserved
    AllocationFailed {
        /// Number of entries the map held when growth failed
        entries: usize,
        /// What the allocator refused
        source: TryReserveError,
    },
}

impl PaletteError {
    pub(crate) fn allocation(entries: usize, source: TryReserveError) -> Self {
        PaletteError::AllocationFailed { entries, source }
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::AllocationFailed { entries, source } => {
                write!(
                    f,
                    "failed to allocate palette entry (map holds {} entries): {}",
                    entries, source
                )
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::AllocationFailed { source, .. } => Some(source),
        }
    }
}
