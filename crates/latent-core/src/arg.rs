//! Replay-time view of a captured argument.

use std::fmt;

/// One positional argument handed to a formatter during replay.
///
/// `Arg` plays the role a `va_list` slot plays for C's `vprintf` family:
/// the formatter sees an untyped positional bundle and decides per
/// conversion how to interpret each slot. Captured values are widened
/// the way C's default argument promotions widen them, so a formatter
/// only ever deals with these six shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// A signed integer (`i8`..`i64`, `isize`, `bool`).
    Int(i64),
    /// An unsigned integer (`u8`..`u64`, `usize`).
    UInt(u64),
    /// A floating-point value (`f32` is promoted).
    Float(f64),
    /// A Unicode scalar value.
    Char(char),
    /// A borrowed string.
    Str(&'a str),
    /// The address of a raw pointer.
    Ptr(usize),
}

impl Arg<'_> {
    /// Short name of the variant, used in formatter diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "str",
            Self::Ptr(_) => "ptr",
        }
    }

    /// The value as a signed integer, if it is integral.
    ///
    /// Unsigned values reinterpret their bits; characters yield their
    /// scalar value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => Some(v as i64),
            Self::Char(c) => Some(c as i64),
            _ => None,
        }
    }

    /// The value as an unsigned integer, if it is integral.
    ///
    /// Negative values reinterpret their two's-complement bits.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Int(v) => Some(v as u64),
            Self::UInt(v) => Some(v),
            Self::Char(c) => Some(c as u64),
            Self::Ptr(p) => Some(p as u64),
            _ => None,
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
            Self::Ptr(p) => write!(f, "{p:#x}"),
        }
    }
}
