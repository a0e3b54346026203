//! Fixed-capacity packed arena of type-erased deferred format entries.
//!
//! Each `append` captures a format string and a tuple of argument tokens
//! and writes them, together with a one-word header, straight into a
//! pre-allocated byte buffer. Entries of different concrete types sit
//! back to back with no gaps; a [`Cursor`] walks them by asking each
//! entry for its own size. This crate is the only one in the workspace
//! that contains `unsafe` code. Every raw pointer is created and
//! dereferenced in `raw.rs`; the arena and cursor only call into it,
//! with the capacity check in `append` as the one gate on memory safety.
//!
//! # Layout
//!
//! ```text
//! EntryArena (capacity fixed at construction)
//! ├── storage: [Block; ceil(capacity / 16)]   16-byte aligned, uninitialised
//! │   ├── Slot<Record<A0>> @ 0                 [Header | format | tokens | pad]
//! │   ├── Slot<Record<A1>> @ size0
//! │   └── ...              @ size0 + size1 + ...
//! └── used: offset of the first free byte
//! ```
//!
//! The header is a single pointer to a per-variant vtable carrying the
//! slot's byte size and its replay, format, and drop operations. Because
//! it is the first field of every `repr(C)` slot, any slot start can be
//! read as a header without knowing the slot's concrete type.
//!
//! # Teardown
//!
//! The [`TeardownPolicy`] type parameter decides what happens to entries
//! when the arena is cleared or dropped: [`RunDestructors`] (the default)
//! drops each entry in storage order, [`SkipDestructors`] skips the walk
//! and refuses, at compile time, to store anything that is not `Copy`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod cursor;
pub mod error;
pub mod policy;
mod raw;
pub mod record;

// Public re-exports for the primary API surface.
pub use arena::EntryArena;
pub use config::ArenaConfig;
pub use cursor::{Cursor, EntryRef};
pub use error::ArenaError;
pub use policy::{Admits, RunDestructors, SkipDestructors, TeardownPolicy};
pub use record::{footprint_of, Record};

/// Alignment, in bytes, of every slot and of the arena storage.
///
/// Slot sizes are always a multiple of this value, so every entry starts
/// on a boundary suitable for the next one. Token tuples that need a
/// stricter alignment are rejected at compile time, whether the tuple is
/// appended or only sized:
///
/// ```compile_fail
/// use latent_arena::footprint_of;
/// use latent_core::{Arg, Token};
///
/// #[repr(align(32))]
/// struct Wide(u8);
///
/// impl Token for Wide {
///     fn to_arg(&self) -> Arg<'_> {
///         Arg::UInt(u64::from(self.0))
///     }
/// }
///
/// const _: usize = footprint_of::<(Wide,)>();
/// ```
///
/// Up to the slot alignment is fine:
///
/// ```
/// use latent_arena::{footprint_of, ArenaConfig, EntryArena, SLOT_ALIGN};
/// use latent_core::{Arg, Token};
///
/// #[repr(align(16))]
/// struct Aligned(u8);
///
/// impl Token for Aligned {
///     fn to_arg(&self) -> Arg<'_> {
///         Arg::UInt(u64::from(self.0))
///     }
/// }
///
/// const SIZE: usize = footprint_of::<(Aligned,)>();
/// assert_eq!(SIZE % SLOT_ALIGN, 0);
///
/// let mut arena = EntryArena::new(ArenaConfig::new(SIZE)).unwrap();
/// arena.append("%u", (Aligned(7),)).unwrap();
/// assert_eq!(arena.used_bytes(), SIZE);
/// ```
pub const SLOT_ALIGN: usize = raw::SLOT_ALIGN;
