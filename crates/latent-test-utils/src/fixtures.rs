//! Drop-tracking tokens.
//!
//! A [`DropProbe`] is a capturable token with a destructor. Every probe
//! sharing a [`DropLog`] appends its id to the log when dropped, so tests
//! can assert exactly which entries were destroyed, how often, and in
//! what order.

use std::cell::RefCell;
use std::rc::Rc;

use latent_core::{Arg, Token};

/// Shared record of dropped probe ids, in drop order.
#[derive(Clone, Debug, Default)]
pub struct DropLog {
    ids: Rc<RefCell<Vec<i64>>>,
}

impl DropLog {
    /// Ids dropped so far.
    pub fn dropped(&self) -> Vec<i64> {
        self.ids.borrow().clone()
    }

    fn push(&self, id: i64) {
        self.ids.borrow_mut().push(id);
    }
}

/// A token that logs its id when dropped. Replays as `Arg::Int(id)`.
#[derive(Debug)]
pub struct DropProbe {
    id: i64,
    log: DropLog,
    panic_on_drop: bool,
}

impl DropProbe {
    pub fn new(id: i64, log: &DropLog) -> Self {
        Self {
            id,
            log: log.clone(),
            panic_on_drop: false,
        }
    }

    /// A probe that panics from its destructor after logging.
    pub fn panicking(id: i64, log: &DropLog) -> Self {
        Self {
            id,
            log: log.clone(),
            panic_on_drop: true,
        }
    }
}

impl Token for DropProbe {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Int(self.id)
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.log.push(self.id);
        if self.panic_on_drop && !std::thread::panicking() {
            panic!("drop probe {} panicked", self.id);
        }
    }
}
