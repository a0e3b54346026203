//! Low-level slot placement and reinterpretation.
//!
//! Every raw pointer in the crate is created and dereferenced here. The
//! rest of the crate sees three operations: allocate storage, place a
//! record at an offset, and read back the vtable at an offset. Callers
//! uphold one rule, enforced by `EntryArena::append`: a slot is placed
//! only where it fits inside the storage, at the current fill offset.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

use latent_core::{Entry, ReplayFn};

/// Alignment of the storage and of every slot.
pub(crate) const SLOT_ALIGN: usize = 16;

/// One aligned unit of arena storage.
///
/// The `UnsafeCell` lets slots be written through a pointer taken from a
/// shared view of the storage, and keeps any interior mutability inside
/// user tokens sound.
#[repr(C, align(16))]
pub(crate) struct Block(UnsafeCell<MaybeUninit<[u8; SLOT_ALIGN]>>);

/// Allocate uninitialised storage covering at least `capacity` bytes.
pub(crate) fn alloc_blocks(capacity: usize) -> Box<[Block]> {
    (0..capacity.div_ceil(SLOT_ALIGN))
        .map(|_| Block(UnsafeCell::new(MaybeUninit::uninit())))
        .collect()
}

/// Base address of the storage.
pub(crate) fn base_of(storage: &[Block]) -> NonNull<u8> {
    NonNull::from(storage).cast::<u8>()
}

/// A record type that can live in a slot.
pub(crate) trait Stored: Entry {
    /// Number of argument tokens after the format string.
    const ARITY: usize;

    /// The captured format string.
    fn format(&self) -> &str;
}

/// Per-variant operations, reached through the slot header.
pub(crate) struct EntryVTable {
    pub(crate) byte_size: usize,
    pub(crate) arity: usize,
    pub(crate) format: unsafe fn(NonNull<u8>) -> *const str,
    pub(crate) replay: unsafe fn(NonNull<u8>, &mut ReplayFn<'_>) -> i32,
    pub(crate) drop_in_place: unsafe fn(NonNull<u8>),
}

/// The first word of every slot.
#[repr(C)]
#[derive(Clone, Copy)]
struct Header {
    vtable: &'static EntryVTable,
}

/// A record together with its header, as laid out in storage.
#[repr(C, align(16))]
struct Slot<R> {
    header: Header,
    record: R,
}

struct SlotOf<R>(PhantomData<R>);

impl<R: Stored> SlotOf<R> {
    const LAYOUT: () = {
        assert!(
            mem::offset_of!(Slot<R>, header) == 0,
            "slot header must sit at offset zero"
        );
        assert!(
            mem::align_of::<Slot<R>>() == SLOT_ALIGN,
            "token alignment exceeds the arena slot alignment"
        );
    };

    const SIZE: usize = mem::size_of::<Slot<R>>();

    const VTABLE: &'static EntryVTable = &EntryVTable {
        byte_size: Self::SIZE,
        arity: R::ARITY,
        format: format_of::<R>,
        replay: replay_of::<R>,
        drop_in_place: drop_of::<R>,
    };
}

/// Footprint of a slot holding `R`, padding included.
pub(crate) const fn slot_size<R: Stored>() -> usize {
    let () = SlotOf::<R>::LAYOUT;
    SlotOf::<R>::SIZE
}

/// Write `record` as a slot at `offset`.
///
/// # Safety
///
/// `offset` must be a multiple of [`SLOT_ALIGN`], and
/// `[offset, offset + slot_size::<R>())` must lie inside the storage
/// `base` was taken from without overlapping a live slot.
pub(crate) unsafe fn place<R: Stored>(base: NonNull<u8>, offset: usize, record: R) {
    let () = SlotOf::<R>::LAYOUT;
    let slot = Slot {
        header: Header {
            vtable: SlotOf::<R>::VTABLE,
        },
        record,
    };
    // SAFETY: in bounds and aligned per the caller's contract.
    unsafe { base.add(offset).cast::<Slot<R>>().write(slot) };
}

/// Address of the slot starting at `offset`.
///
/// # Safety
///
/// `offset` must lie inside the storage `base` was taken from.
pub(crate) unsafe fn slot_at(base: NonNull<u8>, offset: usize) -> NonNull<u8> {
    // SAFETY: in bounds per the caller's contract.
    unsafe { base.add(offset) }
}

/// Read the vtable of the slot at `slot`.
///
/// # Safety
///
/// `slot` must address the start of a live slot.
pub(crate) unsafe fn vtable_of(slot: NonNull<u8>) -> &'static EntryVTable {
    // SAFETY: every slot begins with a `Header`, and slot starts are
    // aligned for it.
    unsafe { slot.cast::<Header>().read().vtable }
}

/// Drop every slot in `[offset, end)`, in storage order.
///
/// If a destructor panics, the slots after it are still dropped while
/// unwinding. A second panic during that aborts, as it would for a `Vec`.
///
/// # Safety
///
/// `[offset, end)` must be a run of live, contiguous slots inside the
/// storage `base` was taken from, and none of them may be used again.
pub(crate) unsafe fn drop_range(base: NonNull<u8>, mut offset: usize, end: usize) {
    struct Resume {
        base: NonNull<u8>,
        offset: usize,
        end: usize,
    }

    impl Drop for Resume {
        fn drop(&mut self) {
            // SAFETY: the remaining run is still live and unvisited.
            unsafe { drop_range(self.base, self.offset, self.end) };
        }
    }

    while offset < end {
        // SAFETY: `offset` is the start of a live slot in the run.
        let slot = unsafe { slot_at(base, offset) };
        let vtable = unsafe { vtable_of(slot) };
        offset += vtable.byte_size;
        let resume = Resume { base, offset, end };
        // SAFETY: the slot is live and is not visited again.
        unsafe { (vtable.drop_in_place)(slot) };
        mem::forget(resume);
    }
}

unsafe fn format_of<R: Stored>(slot: NonNull<u8>) -> *const str {
    // SAFETY: the caller passes the start of a live `Slot<R>`.
    let slot = unsafe { slot.cast::<Slot<R>>().as_ref() };
    slot.record.format()
}

unsafe fn replay_of<R: Stored>(slot: NonNull<u8>, f: &mut ReplayFn<'_>) -> i32 {
    // SAFETY: the caller passes the start of a live `Slot<R>`.
    let slot = unsafe { slot.cast::<Slot<R>>().as_ref() };
    slot.record.replay(f)
}

unsafe fn drop_of<R: Stored>(slot: NonNull<u8>) {
    // SAFETY: the caller passes the start of a live `Slot<R>` and never
    // touches it again.
    unsafe { ptr::drop_in_place(slot.cast::<Slot<R>>().as_ptr()) };
}
