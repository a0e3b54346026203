//! The erased interface of a recorded event.

use crate::arg::Arg;

/// A replay callback: receives the format string and the positional
/// arguments of one entry and returns a printf-style count.
///
/// Non-negative results are the number of bytes the callback logically
/// produced; negative results signal a formatting failure.
pub type ReplayFn<'f> = dyn FnMut(&str, &[Arg<'_>]) -> i32 + 'f;

/// A recorded format-call event.
///
/// Each call site that captures a distinct combination of argument types
/// produces a distinct concrete entry type; this trait is the uniform
/// face they all present once their concrete type is erased.
pub trait Entry {
    /// Hand the entry's format string and arguments, in capture order,
    /// to `f` and return whatever `f` returns.
    fn replay(&self, f: &mut ReplayFn<'_>) -> i32;

    /// Exact number of bytes this entry occupies in its arena.
    ///
    /// Constant for a given concrete entry type, including the trailing
    /// padding that places the next entry.
    fn byte_size(&self) -> usize;
}
