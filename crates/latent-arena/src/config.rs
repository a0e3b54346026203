//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`EntryArena`](crate::EntryArena).
///
/// Capacity is the only knob; it is fixed when the arena is built and
/// the arena never grows past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total bytes available for entries.
    ///
    /// Default: 4000. Must be non-zero. Storage is allocated in 16-byte
    /// blocks, but entries are admitted only while their cumulative
    /// footprint stays within this exact figure.
    pub capacity: usize,
}

impl ArenaConfig {
    /// Default capacity in bytes.
    pub const DEFAULT_CAPACITY: usize = 4000;

    /// Create a config with the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check that the config can back an arena.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_4000_bytes() {
        assert_eq!(ArenaConfig::default().capacity, 4000);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            ArenaConfig::new(0).validate(),
            Err(ArenaError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn unaligned_capacity_is_accepted() {
        assert!(ArenaConfig::new(95).validate().is_ok());
    }
}
