//! C-style entry points.
//!
//! Each returns the byte count as an `i32`, or `-1` on failure, so any of
//! them can be handed straight to a replay driver as the formatting
//! function.

use std::io;

use latent_core::Arg;
use tracing::trace;

use crate::error::FormatError;
use crate::render::vformat;
use crate::sink::SliceSink;

/// Render into a fresh `String`.
pub fn vsprintf(format: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len());
    vformat(&mut out, format, args)?;
    Ok(out)
}

/// Render into a bounded sink.
///
/// Returns the number of bytes the output needed, whether or not they all
/// fit. On error the sink is rewound to where it was before the call and
/// `-1` is returned.
pub fn vsnprintf(sink: &mut SliceSink<'_>, format: &str, args: &[Arg<'_>]) -> i32 {
    let mark = sink.mark();
    match vformat(sink, format, args) {
        Ok(n) => count(n),
        Err(err) => {
            trace!(%err, format, "vsnprintf failed");
            sink.rewind(mark);
            -1
        }
    }
}

/// Render to an `io::Write`.
///
/// Nothing is written when the format fails.
pub fn vfprintf<W: io::Write + ?Sized>(out: &mut W, format: &str, args: &[Arg<'_>]) -> i32 {
    let text = match vsprintf(format, args) {
        Ok(text) => text,
        Err(err) => {
            trace!(%err, format, "vfprintf failed");
            return -1;
        }
    };
    match out.write_all(text.as_bytes()) {
        Ok(()) => count(text.len()),
        Err(err) => {
            trace!(%err, format, "vfprintf write failed");
            -1
        }
    }
}

/// Render to standard output.
pub fn vprintf(format: &str, args: &[Arg<'_>]) -> i32 {
    vfprintf(&mut io::stdout().lock(), format, args)
}

/// Byte count as a printf return value; `-1` if it does not fit.
fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(-1)
}
