//! The deferred printf driver.
//!
//! [`DeferredPrintf`] owns one [`EntryArena`]. Recording captures a format
//! string and its arguments without formatting anything; applying walks
//! the arena in recording order and hands every entry to a caller-chosen
//! formatting function, summing what it reports.

use latent_arena::{
    Admits, ArenaConfig, ArenaError, Cursor, EntryArena, EntryRef, RunDestructors, TeardownPolicy,
};
use latent_core::{Arg, TokenList};
use tracing::warn;

use crate::report::ReplayReport;

/// Records printf-style calls now and replays them later.
///
/// ```
/// use latent::DeferredPrintf;
/// use latent::printf::vsprintf;
///
/// let mut log = DeferredPrintf::new();
/// log.record("Integer: %d", (42,)).unwrap();
/// latent::record!(log, "Hex: %x", 255).unwrap();
///
/// let mut lines = Vec::new();
/// let bytes = log.apply(|format: &str, args: &[latent::Arg<'_>]| {
///     let line = vsprintf(format, args).unwrap();
///     let n = line.len() as i32;
///     lines.push(line);
///     n
/// });
/// assert_eq!(lines, ["Integer: 42", "Hex: ff"]);
/// assert_eq!(bytes, 18);
/// ```
#[derive(Debug)]
pub struct DeferredPrintf<'a, P: TeardownPolicy = RunDestructors> {
    arena: EntryArena<'a, P>,
}

impl<'a> DeferredPrintf<'a> {
    /// A driver over an arena of [`ArenaConfig::DEFAULT_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver over an arena of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// A driver over an arena built from `config`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::with_policy(config)
    }
}

impl<'a, P: TeardownPolicy> DeferredPrintf<'a, P> {
    /// A driver with an explicit teardown policy.
    pub fn with_policy(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            arena: EntryArena::with_policy(config)?,
        })
    }

    /// Capture one call. Nothing is formatted.
    ///
    /// If the entry does not fit, it is dropped and
    /// [`ArenaError::CapacityExceeded`] is returned; earlier entries are
    /// untouched.
    pub fn record<A>(&mut self, format: &'a str, tokens: A) -> Result<(), ArenaError>
    where
        A: TokenList + 'a,
        P: Admits<A>,
    {
        self.arena.append(format, tokens)
    }

    /// Replay every entry through `f`, in recording order.
    ///
    /// Returns the sum of the non-negative results. A negative result is
    /// logged and left out of the sum; the walk always visits every
    /// entry. Use [`apply_report`](Self::apply_report) to see which
    /// entries failed.
    pub fn apply<F>(&self, f: F) -> usize
    where
        F: FnMut(&str, &[Arg<'_>]) -> i32,
    {
        self.apply_report(f).total
    }

    /// Like [`apply`](Self::apply), with per-entry failures itemised.
    pub fn apply_report<F>(&self, mut f: F) -> ReplayReport
    where
        F: FnMut(&str, &[Arg<'_>]) -> i32,
    {
        let mut report = ReplayReport::default();
        for (index, entry) in self.arena.iter().enumerate() {
            let code = entry.replay(&mut f);
            if let Err(failure) = report.note(index, entry.offset(), code) {
                warn!(
                    index = failure.index,
                    offset = failure.offset,
                    code = failure.code,
                    format = entry.format(),
                    "entry failed to replay"
                );
            }
        }
        report
    }

    /// Replay with a leading destination argument bound ahead of the
    /// format string, for formatters shaped like `fprintf` or
    /// `snprintf`.
    ///
    /// Measuring and then filling a buffer of exactly the measured size:
    ///
    /// ```
    /// use latent::DeferredPrintf;
    /// use latent::printf::{vsnprintf, SliceSink};
    ///
    /// let mut log = DeferredPrintf::new();
    /// log.record("Dynamic buffer %d %d", (5, 6)).unwrap();
    ///
    /// let needed = log.apply_with(vsnprintf, &mut SliceSink::measure());
    /// let mut buf = vec![0u8; needed];
    /// let written = log.apply_with(vsnprintf, &mut SliceSink::new(&mut buf));
    /// assert_eq!(written, needed);
    /// assert_eq!(buf, b"Dynamic buffer 5 6");
    /// ```
    pub fn apply_with<L, F>(&self, mut f: F, leading: &mut L) -> usize
    where
        L: ?Sized,
        F: FnMut(&mut L, &str, &[Arg<'_>]) -> i32,
    {
        self.apply(|format: &str, args: &[Arg<'_>]| f(&mut *leading, format, args))
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Bytes of arena space in use.
    pub fn used_bytes(&self) -> usize {
        self.arena.used_bytes()
    }

    /// Total arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Drop every entry (per the teardown policy) and start over.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Iterate over the recorded entries.
    pub fn iter(&self) -> Cursor<'_> {
        self.arena.iter()
    }

    /// The underlying arena.
    pub fn arena(&self) -> &EntryArena<'a, P> {
        &self.arena
    }
}

impl<P: TeardownPolicy> Default for DeferredPrintf<'_, P> {
    fn default() -> Self {
        Self {
            arena: EntryArena::default(),
        }
    }
}

impl<'r, 'a, P: TeardownPolicy> IntoIterator for &'r DeferredPrintf<'a, P> {
    type Item = EntryRef<'r>;
    type IntoIter = Cursor<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Record a call with the arguments written out, as at a printf call site.
///
/// `record!(log, "%d %s", n, name)` is `log.record("%d %s", (n, name))`.
///
/// ```
/// let mut log = latent::DeferredPrintf::new();
/// latent::record!(log, "no arguments").unwrap();
/// latent::record!(log, "%s has %d items", "cart", 3).unwrap();
/// assert_eq!(log.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    ($log:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $log.record($format, ($($arg,)*))
    };
}
