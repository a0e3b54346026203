//! Error types shared across the workspace.

use std::error::Error;
use std::fmt;

/// A single entry whose replay callback returned a negative count.
///
/// Failures are collected rather than propagated: one bad entry never
/// stops the remaining entries from replaying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayFailure {
    /// Position of the entry in recording order.
    pub index: usize,
    /// Byte offset of the entry within its arena.
    pub offset: usize,
    /// The negative value the callback returned.
    pub code: i32,
}

impl fmt::Display for ReplayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} at offset {} failed to replay (code {})",
            self.index, self.offset, self.code
        )
    }
}

impl Error for ReplayFailure {}
