//! Aggregate outcome of one replay pass.

use latent_core::ReplayFailure;

/// What a replay pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Sum of the non-negative counts returned by the callback.
    pub total: usize,
    /// Number of entries whose callback returned a non-negative count.
    pub replayed: usize,
    /// Entries whose callback returned a negative count, in replay order.
    pub failures: Vec<ReplayFailure>,
}

impl ReplayReport {
    /// Whether every entry replayed successfully.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of entries visited, successful or not.
    pub fn attempted(&self) -> usize {
        self.replayed + self.failures.len()
    }

    /// Fold one callback result into the report.
    pub(crate) fn note(&mut self, index: usize, offset: usize, code: i32) -> Result<(), ReplayFailure> {
        match usize::try_from(code) {
            Ok(count) => {
                self.total += count;
                self.replayed += 1;
                Ok(())
            }
            Err(_) => {
                let failure = ReplayFailure {
                    index,
                    offset,
                    code,
                };
                self.failures.push(failure);
                Err(failure)
            }
        }
    }
}
