//! Benchmark workloads for the latent deferred formatting workspace.
//!
//! - [`mixed_capacity`]: arena bytes needed for a [`record_mixed`] batch
//! - [`record_mixed`]: a repeating batch of differently-typed entries

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use latent::arena::footprint_of;
use latent::{ArenaError, DeferredPrintf};

/// Number of distinct entry shapes [`record_mixed`] cycles through.
pub const MIXED_SHAPES: usize = 4;

/// Bytes needed to record `count` entries with [`record_mixed`].
pub fn mixed_capacity(count: usize) -> usize {
    let cycle = footprint_of::<(u32,)>()
        + footprint_of::<(&str, i64)>()
        + footprint_of::<(f64, f64)>()
        + footprint_of::<(char, usize, &str)>();
    count.div_ceil(MIXED_SHAPES) * cycle
}

/// Record `count` entries, cycling through [`MIXED_SHAPES`] shapes the
/// way a request handler's trace points might.
pub fn record_mixed(log: &mut DeferredPrintf<'static>, count: usize) -> Result<(), ArenaError> {
    for i in 0..count {
        match i % MIXED_SHAPES {
            0 => log.record("request %u accepted", (i as u32,))?,
            1 => log.record("route %s took %lld us", ("/api/items", i as i64))?,
            2 => log.record("load %.2f of %.2f", (i as f64 * 0.5, 100.0))?,
            _ => log.record("[%c] slot %zu -> %s", ('w', i, "ok"))?,
        }
    }
    Ok(())
}
