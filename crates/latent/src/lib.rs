//! Latent: deferred printf-style event capture and replay.
//!
//! Recording a log line at a hot call site costs a copy of its arguments
//! into a fixed-capacity arena; formatting happens later, when the caller
//! chooses to replay the whole batch through any printf-shaped function.
//! This is the top-level facade crate that re-exports the public API from
//! the latent sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use latent::prelude::*;
//!
//! let mut log = DeferredPrintf::with_capacity(64).unwrap();
//! record!(log, "Entry %d", 1).unwrap();
//! record!(log, "Entry %d", 2).unwrap();
//!
//! // Size the output, then render it into a buffer of exactly that size.
//! let needed = log.apply_with(vsnprintf, &mut SliceSink::measure());
//! let mut buf = vec![0u8; needed];
//! log.apply_with(vsnprintf, &mut SliceSink::new(&mut buf));
//! assert_eq!(buf, b"Entry 1Entry 2");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `latent-core` | `Arg`, `Token`, `TokenList`, the `Entry` trait |
//! | [`arena`] | `latent-arena` | `EntryArena`, cursors, teardown policies |
//! | [`printf`] | `latent-printf` | Reference printf renderer and `SliceSink` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod driver;
pub mod report;

/// Core argument, token, and entry types (`latent-core`).
pub use latent_core as types;

/// Packed entry storage and iteration (`latent-arena`).
///
/// [`arena::EntryArena`] is usable on its own when the driver's
/// aggregation is not wanted.
pub use latent_arena as arena;

/// printf-family renderer over replay arguments (`latent-printf`).
///
/// Every C-style function here returns `i32` and can be handed straight
/// to [`DeferredPrintf::apply`] or [`DeferredPrintf::apply_with`].
pub use latent_printf as printf;

pub use driver::DeferredPrintf;
pub use latent_arena::{ArenaConfig, ArenaError};
pub use latent_core::Arg;
pub use report::ReplayReport;

/// Common imports for typical latent usage.
///
/// ```rust
/// use latent::prelude::*;
/// ```
pub mod prelude {
    // Driver
    pub use crate::driver::DeferredPrintf;
    pub use crate::record;
    pub use crate::report::ReplayReport;

    // Arena
    pub use latent_arena::{ArenaConfig, ArenaError, RunDestructors, SkipDestructors};

    // Core types
    pub use latent_core::{Arg, ReplayFailure, Token, TokenList};

    // Renderer
    pub use latent_printf::{vfprintf, vprintf, vsnprintf, vsprintf, FormatError, SliceSink};
}
