//! The conversion engine behind every entry point.

use std::fmt::{self, Write};
use std::iter;

use latent_core::Arg;

use crate::directive::{self, Count, Directive, Flags};
use crate::error::FormatError;
use crate::sink::Counting;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest width or precision accepted, as for C's `int`.
const MAX_FIELD: usize = i32::MAX as usize;

/// Largest precision `core::fmt` renders. Every `f64` has fewer
/// significant decimal digits, so anything past it is zeros.
const MAX_FMT_PRECISION: usize = u16::MAX as usize;

/// Render `format` with `args` into `out`; return the number of bytes
/// written.
///
/// This is the checked core that [`vsprintf`](crate::vsprintf),
/// [`vsnprintf`](crate::vsnprintf) and [`vfprintf`](crate::vfprintf)
/// wrap. Output already written before an error is left in `out`.
/// Arguments beyond those the format consumes are ignored.
///
/// ```
/// use latent_core::Arg;
/// use latent_printf::vformat;
///
/// let mut out = String::new();
/// let n = vformat(&mut out, "%-5s|%05.1f|%#x", &[
///     Arg::Str("ab"),
///     Arg::Float(2.3),
///     Arg::UInt(255),
/// ])
/// .unwrap();
/// assert_eq!(out, "ab   |002.3|0xff");
/// assert_eq!(n, out.len());
/// ```
pub fn vformat<W>(out: &mut W, format: &str, args: &[Arg<'_>]) -> Result<usize, FormatError>
where
    W: fmt::Write + ?Sized,
{
    let mut out = Counting::new(out);
    let mut args = Args { args, next: 0 };
    let mut rest = 0;

    while let Some(found) = format[rest..].find('%') {
        let start = rest + found;
        out.write_str(&format[rest..start])?;
        let (directive, end) = directive::parse(format, start)?;
        convert(&mut out, &directive, start, &mut args)?;
        rest = end;
    }
    out.write_str(&format[rest..])?;
    Ok(out.count())
}

/// Arguments still to be consumed, in order.
struct Args<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'a> Args<'_, 'a> {
    fn take(&mut self) -> Result<(usize, Arg<'a>), FormatError> {
        let index = self.next;
        let arg = *self
            .args
            .get(index)
            .ok_or(FormatError::MissingArgument { index })?;
        self.next += 1;
        Ok((index, arg))
    }

    fn take_count(&mut self, conversion: char) -> Result<i64, FormatError> {
        let (index, arg) = self.take()?;
        arg.as_i64().ok_or(FormatError::TypeMismatch {
            index,
            conversion,
            found: arg.kind(),
        })
    }
}

/// A directive with `*` counts resolved.
struct Field {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
}

fn convert<W: fmt::Write + ?Sized>(
    out: &mut W,
    directive: &Directive,
    start: usize,
    args: &mut Args<'_, '_>,
) -> Result<(), FormatError> {
    let conversion = directive.conversion;
    if conversion == '%' {
        out.write_char('%')?;
        return Ok(());
    }
    if !"diuoxXcspfFeEgG".contains(conversion) {
        return Err(FormatError::UnknownConversion {
            conversion,
            offset: start,
        });
    }

    let mut flags = directive.flags;
    let width = match directive.width {
        None => 0,
        Some(Count::Fixed(w)) => w,
        Some(Count::Star) => {
            let w = args.take_count(conversion)?;
            if w < 0 {
                flags.left = true;
            }
            usize::try_from(w.unsigned_abs()).unwrap_or(usize::MAX)
        }
    };
    let precision = match directive.precision {
        None => None,
        Some(Count::Fixed(p)) => Some(p),
        Some(Count::Star) => usize::try_from(args.take_count(conversion)?).ok(),
    };
    if width > MAX_FIELD || precision.is_some_and(|p| p > MAX_FIELD) {
        return Err(FormatError::Overflow { offset: start });
    }
    let field = Field {
        flags,
        width,
        precision,
    };

    let (index, arg) = args.take()?;
    let mismatch = FormatError::TypeMismatch {
        index,
        conversion,
        found: arg.kind(),
    };

    match conversion {
        'd' | 'i' => {
            let value = arg.as_i64().ok_or(mismatch)?;
            let value = match directive.length {
                directive::Length::Char => i64::from(value as i8),
                directive::Length::Short => i64::from(value as i16),
                _ => value,
            };
            let sign = sign_of(value < 0, &field.flags);
            let digits = integer_digits(value.unsigned_abs(), 10, false, field.precision);
            pad_number(out, &field, sign, "", &digits)
        }
        'u' | 'o' | 'x' | 'X' => {
            let value = unsigned_value(arg, directive.length.unsigned_bits()).ok_or(mismatch)?;
            let (radix, upper) = match conversion {
                'u' => (10, false),
                'o' => (8, false),
                'x' => (16, false),
                _ => (16, true),
            };
            let mut digits = integer_digits(value, radix, upper, field.precision);
            let mut prefix = "";
            if field.flags.alt {
                match conversion {
                    'o' if !digits.starts_with('0') => digits.insert(0, '0'),
                    'x' if value != 0 => prefix = "0x",
                    'X' if value != 0 => prefix = "0X",
                    _ => {}
                }
            }
            pad_number(out, &field, "", prefix, &digits)
        }
        'c' => {
            let c = match arg {
                Arg::Char(c) => c,
                Arg::Int(_) | Arg::UInt(_) => arg
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .and_then(char::from_u32)
                    .ok_or(mismatch)?,
                _ => return Err(mismatch),
            };
            let mut buf = [0u8; 4];
            pad_text(out, &field, c.encode_utf8(&mut buf))
        }
        's' => {
            let Arg::Str(s) = arg else {
                return Err(mismatch);
            };
            let s = match field.precision {
                Some(p) => truncate_at_char(s, p),
                None => s,
            };
            pad_text(out, &field, s)
        }
        'p' => {
            let address = match arg {
                Arg::Ptr(p) => p,
                _ => return Err(mismatch),
            };
            if address == 0 {
                pad_text(out, &field, "(nil)")
            } else {
                pad_text(out, &field, &format!("{address:#x}"))
            }
        }
        _ => {
            let value = match arg {
                Arg::Float(v) => v,
                _ => return Err(mismatch),
            };
            render_float(out, &field, conversion, value)
        }
    }
}

/// Reinterpret `arg` as unsigned, narrowing as C's integer promotions
/// would: negatives wrap at `bits`, and `h`/`hh` mask every value.
fn unsigned_value(arg: Arg<'_>, bits: u32) -> Option<u64> {
    let mask = if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 };
    match arg {
        Arg::Int(v) if v < 0 => Some(v as u64 & mask),
        Arg::Int(_) | Arg::UInt(_) | Arg::Char(_) => {
            let value = arg.as_u64()?;
            Some(if bits < 32 { value & mask } else { value })
        }
        _ => None,
    }
}

fn sign_of(negative: bool, flags: &Flags) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

/// Digits of `value` in `radix`, left-padded with zeros to `precision`.
///
/// A zero precision with a zero value yields no digits at all.
fn integer_digits(value: u64, radix: u32, upper: bool, precision: Option<usize>) -> String {
    let mut digits = if precision == Some(0) && value == 0 {
        String::new()
    } else {
        match (radix, upper) {
            (8, _) => format!("{value:o}"),
            (16, false) => format!("{value:x}"),
            (16, true) => format!("{value:X}"),
            _ => value.to_string(),
        }
    };
    if let Some(p) = precision {
        if digits.len() < p {
            digits.insert_str(0, &"0".repeat(p - digits.len()));
        }
    }
    digits
}

/// Pad an integer conversion to the field width. The `0` flag is
/// ignored when a precision is given.
fn pad_number<W: fmt::Write + ?Sized>(
    out: &mut W,
    field: &Field,
    sign: &str,
    prefix: &str,
    digits: &str,
) -> Result<(), FormatError> {
    let zero = field.flags.zero && field.precision.is_none();
    pad(out, field, zero, &[sign, prefix], digits)
}

fn pad_text<W: fmt::Write + ?Sized>(out: &mut W, field: &Field, text: &str) -> Result<(), FormatError> {
    pad(out, field, false, &[], text)
}

/// Write `lead` then `body`, padded to the field width. Zero padding
/// goes between the two; space padding goes outside both.
fn pad<W: fmt::Write + ?Sized>(
    out: &mut W,
    field: &Field,
    zero: bool,
    lead: &[&str],
    body: &str,
) -> Result<(), FormatError> {
    let len: usize = lead.iter().map(|s| s.len()).sum::<usize>() + body.len();
    let fill = field.width.saturating_sub(len);

    if field.flags.left {
        lead.iter().try_for_each(|s| out.write_str(s))?;
        out.write_str(body)?;
        repeat(out, ' ', fill)?;
    } else if zero {
        lead.iter().try_for_each(|s| out.write_str(s))?;
        repeat(out, '0', fill)?;
        out.write_str(body)?;
    } else {
        repeat(out, ' ', fill)?;
        lead.iter().try_for_each(|s| out.write_str(s))?;
        out.write_str(body)?;
    }
    Ok(())
}

fn repeat<W: fmt::Write + ?Sized>(out: &mut W, c: char, n: usize) -> fmt::Result {
    (0..n).try_for_each(|_| out.write_char(c))
}

/// The longest prefix of `s` no longer than `max` bytes that ends on a
/// character boundary.
fn truncate_at_char(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn render_float<W: fmt::Write + ?Sized>(
    out: &mut W,
    field: &Field,
    conversion: char,
    value: f64,
) -> Result<(), FormatError> {
    let upper = conversion.is_ascii_uppercase();
    let sign = sign_of(value.is_sign_negative(), &field.flags);
    let magnitude = value.abs();

    if !magnitude.is_finite() {
        let body = match (magnitude.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return pad(out, field, false, &[sign], body);
    }

    let precision = field.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let alt = field.flags.alt;
    let body = match conversion.to_ascii_lowercase() {
        'f' => fixed(magnitude, precision, alt),
        'e' => scientific(magnitude, precision, upper, alt),
        _ => general(magnitude, precision, upper, alt),
    };
    pad(out, field, field.flags.zero, &[sign], &body)
}

fn fixed(value: f64, precision: usize, alt: bool) -> String {
    let shown = precision.min(MAX_FMT_PRECISION);
    let mut s = format!("{value:.shown$}");
    s.extend(iter::repeat_n('0', precision - shown));
    if alt && precision == 0 {
        s.push('.');
    }
    s
}

/// Decimal exponent of `value` once rounded to `precision` fractional
/// digits in scientific form.
fn exponent_of(value: f64, precision: usize) -> i32 {
    if value == 0.0 {
        return 0;
    }
    let shown = precision.min(MAX_FMT_PRECISION);
    let s = format!("{value:.shown$e}");
    s.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn scientific(value: f64, precision: usize, upper: bool, alt: bool) -> String {
    let shown = precision.min(MAX_FMT_PRECISION);
    let s = format!("{value:.shown$e}");
    let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    let mut body = String::with_capacity(mantissa.len() + precision - shown + 5);
    body.push_str(mantissa);
    body.extend(iter::repeat_n('0', precision - shown));
    if alt && precision == 0 {
        body.push('.');
    }
    body.push(if upper { 'E' } else { 'e' });
    body.push(if exp < 0 { '-' } else { '+' });
    // Infallible for `String`.
    let _ = write!(body, "{:02}", exp.unsigned_abs());
    body
}

fn general(value: f64, precision: usize, upper: bool, alt: bool) -> String {
    let p = precision.max(1);
    let x = exponent_of(value, p - 1);
    let p_signed = i32::try_from(p).unwrap_or(i32::MAX);

    let mut body = if x >= -4 && x < p_signed {
        let frac = usize::try_from(p_signed - 1 - x).unwrap_or(0);
        fixed(value, frac, alt)
    } else {
        scientific(value, p - 1, upper, alt)
    };

    if !alt {
        strip_trailing_zeros(&mut body);
    }
    body
}

/// Drop trailing fractional zeros (and a bare point) from a fixed or
/// scientific body, keeping any exponent.
fn strip_trailing_zeros(body: &mut String) {
    let exp_at = body.find(['e', 'E']).unwrap_or(body.len());
    let (mantissa, exponent) = body.split_at(exp_at);
    if !mantissa.contains('.') {
        return;
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    *body = format!("{trimmed}{exponent}");
}
