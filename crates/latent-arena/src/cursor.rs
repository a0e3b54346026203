//! Forward iteration over packed entries.
//!
//! A [`Cursor`] holds nothing but a position. Advancing reads the header
//! of the entry under it, asks that entry for its byte size, and moves
//! past it; no index of entry offsets is kept anywhere.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use latent_core::{Arg, Entry, ReplayFn};

use crate::raw::{self, EntryVTable};

/// A position within an arena, bounded by the arena's fill offset at the
/// time the cursor was created.
///
/// Cursors borrow the arena, so it cannot be appended to or cleared
/// while one is alive. Two cursors are equal when they point at the same
/// offset of the same arena.
#[derive(Clone)]
pub struct Cursor<'r> {
    base: NonNull<u8>,
    offset: usize,
    end: usize,
    _arena: PhantomData<&'r ()>,
}

impl<'r> Cursor<'r> {
    pub(crate) fn new(base: NonNull<u8>, offset: usize, end: usize) -> Self {
        Self {
            base,
            offset,
            end,
            _arena: PhantomData,
        }
    }

    /// Byte offset of the entry under the cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the cursor is past the last entry.
    pub fn is_end(&self) -> bool {
        self.offset >= self.end
    }

    /// The entry under the cursor, without advancing.
    #[allow(unsafe_code)]
    pub fn entry(&self) -> Option<EntryRef<'r>> {
        if self.is_end() {
            return None;
        }
        // SAFETY: offsets only ever move by whole slot sizes starting at
        // zero, so `offset < end` is the start of a live slot.
        Some(unsafe { EntryRef::at(self.base, self.offset) })
    }

    /// Step past the entry under the cursor. No-op at the end.
    pub fn advance(&mut self) {
        if let Some(entry) = self.entry() {
            self.offset += entry.byte_size();
        }
    }
}

impl<'r> Iterator for Cursor<'r> {
    type Item = EntryRef<'r>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entry()?;
        self.offset += entry.byte_size();
        Some(entry)
    }
}

impl FusedIterator for Cursor<'_> {}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.offset == other.offset
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("end", &self.end)
            .finish()
    }
}

/// A type-erased view of one entry in an arena.
///
/// Everything the entry's concrete type knows (its size, its arity, how
/// to hand its tokens to a formatter) is reached through the vtable in
/// the entry's header.
#[derive(Clone, Copy)]
pub struct EntryRef<'r> {
    slot: NonNull<u8>,
    offset: usize,
    vtable: &'static EntryVTable,
    _arena: PhantomData<&'r ()>,
}

impl<'r> EntryRef<'r> {
    /// # Safety
    ///
    /// `offset` must be the start of a live slot in the storage `base`
    /// points at, and that slot must stay live for `'r`.
    #[allow(unsafe_code)]
    unsafe fn at(base: NonNull<u8>, offset: usize) -> Self {
        // SAFETY: forwarded from the caller.
        let slot = unsafe { raw::slot_at(base, offset) };
        let vtable = unsafe { raw::vtable_of(slot) };
        Self {
            slot,
            offset,
            vtable,
            _arena: PhantomData,
        }
    }

    /// Byte offset of this entry within its arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Exact number of bytes this entry occupies.
    pub fn byte_size(&self) -> usize {
        self.vtable.byte_size
    }

    /// Number of captured argument tokens, not counting the format string.
    pub fn arity(&self) -> usize {
        self.vtable.arity
    }

    /// The captured format string.
    #[allow(unsafe_code)]
    pub fn format(&self) -> &'r str {
        // SAFETY: the slot is live for `'r`, and the format string it
        // holds outlives the arena.
        unsafe { &*(self.vtable.format)(self.slot) }
    }

    /// Hand the format string and arguments to `f`; return its result.
    #[allow(unsafe_code)]
    pub fn replay(&self, f: &mut ReplayFn<'_>) -> i32 {
        // SAFETY: the slot is live for `'r` and its vtable matches it.
        unsafe { (self.vtable.replay)(self.slot, f) }
    }

    /// Like [`replay`](Self::replay), with a leading destination argument
    /// bound ahead of the format string.
    pub fn replay_with<L, F>(&self, mut f: F, leading: &mut L) -> i32
    where
        L: ?Sized,
        F: FnMut(&mut L, &str, &[Arg<'_>]) -> i32,
    {
        self.replay(&mut |format: &str, args: &[Arg<'_>]| f(&mut *leading, format, args))
    }
}

impl Entry for EntryRef<'_> {
    fn replay(&self, f: &mut ReplayFn<'_>) -> i32 {
        EntryRef::replay(self, f)
    }

    fn byte_size(&self) -> usize {
        EntryRef::byte_size(self)
    }
}

impl fmt::Debug for EntryRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRef")
            .field("offset", &self.offset)
            .field("byte_size", &self.byte_size())
            .field("arity", &self.arity())
            .field("format", &self.format())
            .finish()
    }
}
