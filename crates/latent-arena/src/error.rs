//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The entry does not fit in the arena's remaining space. Nothing
    /// was written; the event is dropped.
    CapacityExceeded {
        /// Footprint of the rejected entry in bytes.
        requested: usize,
        /// Bytes still free when the entry was rejected.
        remaining: usize,
        /// Total capacity of the arena.
        capacity: usize,
    },
    /// The configured capacity cannot back an arena.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, \
                     {remaining} of {capacity} bytes remaining"
                )
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "invalid arena capacity: {capacity} bytes")
            }
        }
    }
}

impl Error for ArenaError {}
