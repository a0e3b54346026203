//! Typed entries: a format string plus the tokens captured with it.
//!
//! A [`Record`] is the concrete, un-erased form of an entry. Each
//! distinct token tuple `A` is its own variant; once appended, the arena
//! only ever sees it through the erased [`Entry`] interface.

use std::fmt;

use latent_core::{Entry, ReplayFn, TokenList};

use crate::raw::{self, Stored};

/// One captured format call.
///
/// The format string is the first token; `tokens` holds the remaining
/// ones in capture order. A record is never mutated after construction.
pub struct Record<'a, A> {
    format: &'a str,
    tokens: A,
}

impl<'a, A: TokenList> Record<'a, A> {
    /// Capture a format string and its argument tokens.
    pub fn new(format: &'a str, tokens: A) -> Self {
        Self { format, tokens }
    }

    /// The captured format string.
    pub fn format(&self) -> &'a str {
        self.format
    }

    /// The captured argument tokens.
    pub fn tokens(&self) -> &A {
        &self.tokens
    }
}

impl<A: TokenList> Entry for Record<'_, A> {
    fn replay(&self, f: &mut ReplayFn<'_>) -> i32 {
        let args = self.tokens.to_args();
        f(self.format, &args)
    }

    fn byte_size(&self) -> usize {
        raw::slot_size::<Self>()
    }
}

impl<A: TokenList> Stored for Record<'_, A> {
    const ARITY: usize = A::ARITY;

    fn format(&self) -> &str {
        self.format
    }
}

impl<A> fmt::Debug for Record<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("format", &self.format)
            .field("tokens", &std::any::type_name::<A>())
            .finish()
    }
}

/// Bytes an entry capturing the token tuple `A` occupies in an arena.
///
/// Useful for sizing an arena up front:
///
/// ```
/// use latent_arena::{footprint_of, ArenaConfig, EntryArena};
///
/// let per_entry = footprint_of::<(i32,)>();
/// let mut arena = EntryArena::new(ArenaConfig::new(3 * per_entry)).unwrap();
/// for i in 0..3 {
///     arena.append("Entry %d", (i,)).unwrap();
/// }
/// assert_eq!(arena.remaining(), 0);
/// assert!(arena.append("Entry %d", (3,)).is_err());
/// ```
pub const fn footprint_of<A: TokenList>() -> usize {
    raw::slot_size::<Record<'static, A>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use latent_core::Arg;

    use crate::SLOT_ALIGN;

    #[test]
    fn replay_passes_format_then_args_in_order() {
        let record = Record::new("%d %s %c", (7i32, "seven", '7'));
        let mut seen = Vec::new();
        let code = record.replay(&mut |format: &str, args: &[Arg<'_>]| {
            seen.push(format.to_string());
            seen.extend(args.iter().map(|a| a.to_string()));
            3
        });
        assert_eq!(code, 3);
        assert_eq!(seen, ["%d %s %c", "7", "seven", "7"]);
    }

    #[test]
    fn replay_returns_callback_code_verbatim() {
        let record = Record::new("x", ());
        assert_eq!(record.replay(&mut |_: &str, _: &[Arg<'_>]| -1), -1);
    }

    #[test]
    fn byte_size_matches_footprint() {
        let record = Record::new("%d", (1i32,));
        assert_eq!(record.byte_size(), footprint_of::<(i32,)>());
    }

    #[test]
    fn footprints_are_slot_aligned() {
        for size in [
            footprint_of::<()>(),
            footprint_of::<(u8,)>(),
            footprint_of::<(i32, i32, i32)>(),
            footprint_of::<(f64, &str, char, u64)>(),
            footprint_of::<(String,)>(),
        ] {
            assert!(size > 0);
            assert_eq!(size % SLOT_ALIGN, 0, "footprint {size} is not slot aligned");
        }
    }

    #[test]
    fn footprint_covers_header_and_record() {
        let record_size = std::mem::size_of::<Record<'static, (i32, f64)>>();
        let header_size = std::mem::size_of::<usize>();
        let footprint = footprint_of::<(i32, f64)>();
        assert!(footprint >= record_size + header_size);
        assert!(footprint < record_size + header_size + SLOT_ALIGN);
    }

    #[test]
    fn single_int_entry_is_32_bytes_on_64_bit() {
        if cfg!(target_pointer_width = "64") {
            assert_eq!(footprint_of::<(i32,)>(), 32);
        }
    }

    #[test]
    fn accessors_expose_captured_state() {
        let record = Record::new("%u", (5u8,));
        assert_eq!(record.format(), "%u");
        assert_eq!(record.tokens(), &(5u8,));
        assert_eq!(<Record<'_, (u8,)> as Stored>::ARITY, 1);
    }
}
