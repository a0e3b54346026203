//! Core types and traits for the latent deferred-formatting workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by capture and replay: the [`Token`] values a
//! call site captures, the [`Arg`] view a formatter receives, and the
//! [`Entry`] interface every recorded event exposes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arg;
pub mod entry;
pub mod error;
pub mod token;

pub use arg::Arg;
pub use entry::{Entry, ReplayFn};
pub use error::ReplayFailure;
pub use token::{ArgList, Token, TokenList};
