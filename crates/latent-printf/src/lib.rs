//! A printf-family renderer over replay arguments.
//!
//! Deferred entries hand a formatter a C-style format string and a slice
//! of [`Arg`](latent_core::Arg)s. This crate renders that pair: [`vformat`]
//! is the checked core, and [`vsprintf`], [`vsnprintf`], [`vfprintf`] and
//! [`vprintf`] are the C-shaped wrappers whose `i32` results plug directly
//! into a replay driver.
//!
//! Supported conversions are `d i u o x X c s p f F e E g G %`, with the
//! flags `- + space 0 #`, field width and precision (either of which may be
//! `*`), and the length modifiers `hh h l ll j z t L q`. Length modifiers
//! matter only where C's integer promotions would: `hh`/`h` narrow, and a
//! negative value given to an unsigned conversion wraps at 32 bits unless a
//! wider modifier is present.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod directive;
pub mod error;
mod printf;
mod render;
pub mod sink;

pub use error::FormatError;
pub use printf::{vfprintf, vprintf, vsnprintf, vsprintf};
pub use render::vformat;
pub use sink::SliceSink;
