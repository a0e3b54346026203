//! Parsing of a single `%` directive.

use crate::error::FormatError;

/// Flag characters that may follow `%`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub left: bool,
    pub plus: bool,
    pub space: bool,
    pub zero: bool,
    pub alt: bool,
}

/// A width or precision as written in the directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Count {
    Fixed(usize),
    /// `*`: taken from the next argument.
    Star,
}

/// Length modifier. Only the integer width it implies matters here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Length {
    #[default]
    None,
    Char,
    Short,
    /// `l`, `ll`, `j`, `z`, `t`, `L`, `q`.
    Wide,
}

impl Length {
    /// Bit width a negative value is reinterpreted at by unsigned
    /// conversions.
    pub(crate) fn unsigned_bits(self) -> u32 {
        match self {
            Self::None => 32,
            Self::Char => 8,
            Self::Short => 16,
            Self::Wide => 64,
        }
    }
}

/// One parsed directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Directive {
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    pub length: Length,
    pub conversion: char,
}

/// Parse the directive whose `%` sits at `start`.
///
/// Returns the directive and the offset just past its conversion
/// character.
pub(crate) fn parse(format: &str, start: usize) -> Result<(Directive, usize), FormatError> {
    let bytes = format.as_bytes();
    let truncated = FormatError::Truncated { offset: start };
    let mut pos = start + 1;

    let mut flags = Flags::default();
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b'#' => flags.alt = true,
            _ => break,
        }
        pos += 1;
    }

    let width = parse_count(bytes, &mut pos);

    let precision = if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        Some(parse_count(bytes, &mut pos).unwrap_or(Count::Fixed(0)))
    } else {
        None
    };

    let length = match bytes.get(pos) {
        Some(b'h') if bytes.get(pos + 1) == Some(&b'h') => {
            pos += 2;
            Length::Char
        }
        Some(b'h') => {
            pos += 1;
            Length::Short
        }
        Some(b'l') if bytes.get(pos + 1) == Some(&b'l') => {
            pos += 2;
            Length::Wide
        }
        Some(b'l' | b'j' | b'z' | b't' | b'L' | b'q') => {
            pos += 1;
            Length::Wide
        }
        _ => Length::None,
    };

    let conversion = format[pos..].chars().next().ok_or(truncated)?;
    let directive = Directive {
        flags,
        width,
        precision,
        length,
        conversion,
    };
    Ok((directive, pos + conversion.len_utf8()))
}

fn parse_count(bytes: &[u8], pos: &mut usize) -> Option<Count> {
    if bytes.get(*pos) == Some(&b'*') {
        *pos += 1;
        return Some(Count::Star);
    }
    let mut value: Option<usize> = None;
    while let Some(digit) = bytes.get(*pos).filter(|b| b.is_ascii_digit()) {
        let next = value.unwrap_or(0);
        value = Some(next.saturating_mul(10).saturating_add(usize::from(digit - b'0')));
        *pos += 1;
    }
    value.map(Count::Fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(format: &str) -> Directive {
        let (d, end) = parse(format, 0).unwrap();
        assert_eq!(end, format.len(), "directive should consume {format:?}");
        d
    }

    #[test]
    fn bare_conversion() {
        let d = directive("%d");
        assert_eq!(d.conversion, 'd');
        assert_eq!(d.flags, Flags::default());
        assert_eq!(d.width, None);
        assert_eq!(d.precision, None);
        assert_eq!(d.length, Length::None);
    }

    #[test]
    fn flags_width_precision_length() {
        let d = directive("%-+ 0#12.5llx");
        assert!(d.flags.left && d.flags.plus && d.flags.space && d.flags.zero && d.flags.alt);
        assert_eq!(d.width, Some(Count::Fixed(12)));
        assert_eq!(d.precision, Some(Count::Fixed(5)));
        assert_eq!(d.length, Length::Wide);
        assert_eq!(d.conversion, 'x');
    }

    #[test]
    fn star_counts_and_empty_precision() {
        let d = directive("%*.*f");
        assert_eq!(d.width, Some(Count::Star));
        assert_eq!(d.precision, Some(Count::Star));
        assert_eq!(directive("%.s").precision, Some(Count::Fixed(0)));
    }

    #[test]
    fn length_modifiers() {
        assert_eq!(directive("%hhu").length, Length::Char);
        assert_eq!(directive("%hu").length, Length::Short);
        for f in ["%lu", "%llu", "%ju", "%zu", "%tu", "%Lf", "%qd"] {
            assert_eq!(directive(f).length, Length::Wide, "{f}");
        }
    }

    #[test]
    fn parse_starts_at_offset() {
        let (d, end) = parse("ab %5s cd", 3).unwrap();
        assert_eq!(d.conversion, 's');
        assert_eq!(end, 6);
    }

    #[test]
    fn dangling_percent_is_truncated() {
        assert_eq!(parse("%", 0), Err(FormatError::Truncated { offset: 0 }));
        assert_eq!(parse("x %-08.", 2), Err(FormatError::Truncated { offset: 2 }));
    }

    #[test]
    fn non_ascii_conversion_is_returned_whole() {
        let (d, end) = parse("%é", 0).unwrap();
        assert_eq!(d.conversion, 'é');
        assert_eq!(end, 3);
    }
}
