//! Test utilities and mock types for latent development.
//!
//! Provides replay callbacks that capture rendered output ([`Transcript`],
//! [`fail_when`]) and drop-tracking tokens ([`DropLog`], [`DropProbe`])
//! for asserting teardown behaviour.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{DropLog, DropProbe};

use latent_core::Arg;
use latent_printf::vsprintf;

/// Collects the rendered text of every replayed entry.
///
/// Entries that fail to render are not recorded; the callback returns
/// `-1` for them the way a C formatter would.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A replay callback that appends to this transcript.
    pub fn sink(&mut self) -> impl FnMut(&str, &[Arg<'_>]) -> i32 + '_ {
        move |format: &str, args: &[Arg<'_>]| match vsprintf(format, args) {
            Ok(line) => {
                let n = byte_count(&line);
                self.lines.push(line);
                n
            }
            Err(_) => -1,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// A replay callback that fails (returns `-1`) for every entry whose
/// format string contains `needle`, and otherwise returns the rendered
/// length without keeping the text.
pub fn fail_when(needle: &str) -> impl FnMut(&str, &[Arg<'_>]) -> i32 + '_ {
    move |format: &str, args: &[Arg<'_>]| {
        if format.contains(needle) {
            return -1;
        }
        vsprintf(format, args).map_or(-1, |line| byte_count(&line))
    }
}

fn byte_count(line: &str) -> i32 {
    i32::try_from(line.len()).unwrap_or(i32::MAX)
}
