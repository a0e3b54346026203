//! Error types for rendering.

use std::error::Error;
use std::fmt;

/// Errors from [`vformat`](crate::vformat).
///
/// Offsets are byte offsets into the format string; argument indices are
/// zero-based positions in the argument slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A directive ended in a character that is not a supported conversion.
    UnknownConversion {
        /// The offending conversion character.
        conversion: char,
        /// Offset of the `%` that opened the directive.
        offset: usize,
    },
    /// A conversion needed more arguments than were supplied.
    MissingArgument {
        /// Index of the argument that was expected.
        index: usize,
    },
    /// An argument's kind cannot be rendered by its conversion.
    TypeMismatch {
        /// Index of the argument.
        index: usize,
        /// The conversion character that consumed it.
        conversion: char,
        /// [`Arg::kind`](latent_core::Arg::kind) of the supplied argument.
        found: &'static str,
    },
    /// The format string ended inside a directive.
    Truncated {
        /// Offset of the `%` that opened the directive.
        offset: usize,
    },
    /// A width or precision is larger than a C `int` can hold.
    Overflow {
        /// Offset of the `%` that opened the directive.
        offset: usize,
    },
    /// The destination refused output.
    Write,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownConversion { conversion, offset } => {
                write!(f, "unknown conversion '%{conversion}' at offset {offset}")
            }
            Self::MissingArgument { index } => {
                write!(f, "missing argument {index}")
            }
            Self::TypeMismatch {
                index,
                conversion,
                found,
            } => {
                write!(
                    f,
                    "argument {index} is {found}, which '%{conversion}' cannot render"
                )
            }
            Self::Truncated { offset } => {
                write!(f, "format string ends inside the directive at offset {offset}")
            }
            Self::Overflow { offset } => {
                write!(f, "field width or precision at offset {offset} is too large")
            }
            Self::Write => write!(f, "destination refused output"),
        }
    }
}

impl Error for FormatError {}

impl From<fmt::Error> for FormatError {
    fn from(_: fmt::Error) -> Self {
        Self::Write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let err = FormatError::TypeMismatch {
            index: 2,
            conversion: 'd',
            found: "str",
        };
        assert_eq!(err.to_string(), "argument 2 is str, which '%d' cannot render");
        assert_eq!(
            FormatError::UnknownConversion {
                conversion: 'y',
                offset: 4
            }
            .to_string(),
            "unknown conversion '%y' at offset 4"
        );
    }

    #[test]
    fn overflow_names_the_offset() {
        assert_eq!(
            FormatError::Overflow { offset: 3 }.to_string(),
            "field width or precision at offset 3 is too large"
        );
    }

    #[test]
    fn fmt_error_maps_to_write() {
        assert_eq!(FormatError::from(fmt::Error), FormatError::Write);
    }
}
