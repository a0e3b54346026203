//! The fixed-capacity entry arena.
//!
//! [`EntryArena`] owns a single pre-allocated buffer and appends entries
//! to it back to back. It never grows: an entry that does not fit is
//! rejected whole with [`ArenaError::CapacityExceeded`].

use std::fmt;
use std::marker::PhantomData;

use latent_core::TokenList;
use tracing::{debug, trace};

use crate::config::ArenaConfig;
use crate::cursor::{Cursor, EntryRef};
use crate::error::ArenaError;
use crate::policy::{Admits, RunDestructors, TeardownPolicy};
use crate::raw::{self, Block};
use crate::record::Record;

/// Packed, append-only storage for deferred format entries.
///
/// Entries borrow from data that lives for `'a` (format strings and any
/// borrowed tokens); the borrow checker keeps that data alive for as long
/// as the arena is. `P` picks the [`TeardownPolicy`].
///
/// The arena is deliberately neither `Send` nor `Sync`: callers that
/// share one across threads must wrap it in their own lock.
///
/// # Examples
///
/// ```
/// use latent_arena::{ArenaConfig, EntryArena};
///
/// let mut arena = EntryArena::new(ArenaConfig::default()).unwrap();
/// arena.append("Hello %d %d", (1, 2)).unwrap();
/// arena.append("Test %s", ("string",)).unwrap();
///
/// let formats: Vec<&str> = arena.iter().map(|entry| entry.format()).collect();
/// assert_eq!(formats, ["Hello %d %d", "Test %s"]);
/// ```
pub struct EntryArena<'a, P: TeardownPolicy = RunDestructors> {
    /// Backing storage, allocated once at construction.
    storage: Box<[Block]>,
    /// Admission limit in bytes; never larger than the storage.
    capacity: usize,
    /// Offset of the first free byte.
    used: usize,
    /// Number of live entries in `[0, used)`.
    entries: usize,
    _marker: PhantomData<(&'a (), *const (), fn() -> P)>,
}

impl<'a> EntryArena<'a> {
    /// Create an empty arena that drops its entries at teardown.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::with_policy(config)
    }

    /// Create an empty arena of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }
}

impl<'a, P: TeardownPolicy> EntryArena<'a, P> {
    /// Create an empty arena with an explicit teardown policy.
    pub fn with_policy(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::allocate(config.capacity))
    }

    fn allocate(capacity: usize) -> Self {
        Self {
            storage: raw::alloc_blocks(capacity),
            capacity,
            used: 0,
            entries: 0,
            _marker: PhantomData,
        }
    }

    /// Capture `format` and `tokens` as a new entry at the end of the arena.
    ///
    /// Either the whole entry is written or, if it does not fit in the
    /// remaining space, nothing is and `CapacityExceeded` is returned.
    /// No formatting happens here; the cost is a copy of the tokens.
    #[allow(unsafe_code)]
    pub fn append<A>(&mut self, format: &'a str, tokens: A) -> Result<(), ArenaError>
    where
        A: TokenList + 'a,
        P: Admits<A>,
    {
        let requested = raw::slot_size::<Record<'a, A>>();
        let remaining = self.remaining();
        if requested > remaining {
            debug!(
                requested,
                remaining,
                capacity = self.capacity,
                "entry rejected, arena full"
            );
            return Err(ArenaError::CapacityExceeded {
                requested,
                remaining,
                capacity: self.capacity,
            });
        }

        let offset = self.used;
        debug_assert_eq!(offset % raw::SLOT_ALIGN, 0);
        // SAFETY: `offset + requested <= capacity <= storage bytes`, the
        // offset is a sum of slot sizes and so slot aligned, and
        // everything from `used` onward is free.
        unsafe {
            raw::place(self.base(), offset, Record::new(format, tokens));
        }
        self.used = offset + requested;
        self.entries += 1;
        Ok(())
    }

    /// Total bytes available for entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes occupied by entries so far.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    /// Bytes still free.
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Cursor at the first entry.
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::new(self.base(), 0, self.used)
    }

    /// Cursor one past the last entry.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(self.base(), self.used, self.used)
    }

    /// Iterate over the entries in recording order.
    pub fn iter(&self) -> Cursor<'_> {
        self.begin()
    }

    /// Destroy every entry (per the teardown policy) and start over.
    ///
    /// The storage is kept; capacity is unchanged.
    pub fn clear(&mut self) {
        self.teardown();
    }

    fn base(&self) -> std::ptr::NonNull<u8> {
        raw::base_of(&self.storage)
    }

    #[allow(unsafe_code)]
    fn teardown(&mut self) {
        // Reset first so a panicking destructor leaves an empty arena.
        let end = std::mem::replace(&mut self.used, 0);
        let entries = std::mem::replace(&mut self.entries, 0);
        if entries == 0 {
            return;
        }
        if !P::RUN_DESTRUCTORS {
            trace!(entries, bytes = end, "teardown skipped");
            return;
        }
        trace!(entries, bytes = end, "dropping entries");
        // SAFETY: `[0, end)` held exactly the live slots written by
        // `append`; the counters were reset above so none is seen again.
        unsafe {
            raw::drop_range(self.base(), 0, end);
        }
    }
}

impl<P: TeardownPolicy> Default for EntryArena<'_, P> {
    /// An empty arena of [`ArenaConfig::DEFAULT_CAPACITY`] bytes.
    fn default() -> Self {
        Self::allocate(ArenaConfig::DEFAULT_CAPACITY)
    }
}

impl<P: TeardownPolicy> Drop for EntryArena<'_, P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<'r, 'a, P: TeardownPolicy> IntoIterator for &'r EntryArena<'a, P> {
    type Item = EntryRef<'r>;
    type IntoIter = Cursor<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: TeardownPolicy> fmt::Debug for EntryArena<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryArena")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("entries", &self.entries)
            .field("run_destructors", &P::RUN_DESTRUCTORS)
            .finish()
    }
}
