//! Bounded output for the `snprintf` shape.

use std::fmt;

/// A fixed byte buffer that keeps what fits and counts everything.
///
/// Successive writes append. Bytes past the end of the buffer are
/// dropped but still counted in [`required`](Self::required), so a
/// measuring pass over a zero-length sink reports exactly how large a
/// buffer the filling pass needs.
///
/// No terminator is written.
///
/// ```
/// use latent_core::Arg;
/// use latent_printf::{vsnprintf, SliceSink};
///
/// let args = [Arg::Int(5), Arg::Int(6)];
/// let mut measure = SliceSink::measure();
/// let needed = vsnprintf(&mut measure, "Dynamic buffer %d %d", &args);
/// assert_eq!(needed as usize, measure.required());
///
/// let mut buf = vec![0u8; measure.required()];
/// let mut fill = SliceSink::new(&mut buf);
/// vsnprintf(&mut fill, "Dynamic buffer %d %d", &args);
/// assert!(!fill.is_truncated());
/// assert_eq!(fill.filled(), b"Dynamic buffer 5 6");
/// ```
#[derive(Debug)]
pub struct SliceSink<'b> {
    buf: &'b mut [u8],
    written: usize,
    required: usize,
}

impl<'b> SliceSink<'b> {
    /// A sink over `buf`.
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            required: 0,
        }
    }

    /// Bytes stored in the buffer so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes that would have been stored given unlimited room.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Whether any output was dropped for lack of room.
    pub fn is_truncated(&self) -> bool {
        self.required > self.written
    }

    /// The stored prefix of the output.
    ///
    /// When truncated, the cut may fall inside a multi-byte character.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    /// Size of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Position to return to with [`rewind`](Self::rewind).
    pub(crate) fn mark(&self) -> (usize, usize) {
        (self.written, self.required)
    }

    /// Forget everything written since `mark`.
    pub(crate) fn rewind(&mut self, (written, required): (usize, usize)) {
        self.written = written;
        self.required = required;
    }
}

impl SliceSink<'static> {
    /// A zero-length sink that only counts.
    pub fn measure() -> Self {
        Self::new(&mut [])
    }
}

impl fmt::Write for SliceSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.buf.len() - self.written;
        let take = bytes.len().min(room);
        self.buf[self.written..self.written + take].copy_from_slice(&bytes[..take]);
        self.written += take;
        self.required += bytes.len();
        Ok(())
    }
}

/// Forwards to an inner writer and counts the bytes passed through.
pub(crate) struct Counting<'w, W: ?Sized> {
    inner: &'w mut W,
    count: usize,
}

impl<'w, W: fmt::Write + ?Sized> Counting<'w, W> {
    pub(crate) fn new(inner: &'w mut W) -> Self {
        Self { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl<W: fmt::Write + ?Sized> fmt::Write for Counting<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s)?;
        self.count += s.len();
        Ok(())
    }
}
