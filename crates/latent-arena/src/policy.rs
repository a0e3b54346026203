//! Teardown policies: whether entries are dropped when the arena is.

mod sealed {
    pub trait Sealed {}
}

/// Decides whether an arena runs entry destructors on clear and drop.
///
/// Sealed: the two implementations below are the only ones.
pub trait TeardownPolicy: sealed::Sealed {
    /// `true` if entries are dropped one by one at teardown.
    const RUN_DESTRUCTORS: bool;
}

/// Drop every entry, in storage order, when the arena is cleared or
/// dropped. The default.
#[derive(Clone, Copy, Debug)]
pub enum RunDestructors {}

/// Skip the teardown walk entirely.
///
/// Only `Copy` token tuples, which by construction own nothing that
/// needs dropping, can be appended to an arena with this policy;
/// anything else fails to compile:
///
/// ```compile_fail
/// use latent_arena::{ArenaConfig, EntryArena, SkipDestructors};
///
/// let mut arena = EntryArena::<SkipDestructors>::with_policy(ArenaConfig::default()).unwrap();
/// arena.append("%s", (String::from("owned"),)).unwrap();
/// ```
///
/// Plain values and borrowed strings are fine:
///
/// ```
/// use latent_arena::{ArenaConfig, EntryArena, SkipDestructors};
///
/// let mut arena = EntryArena::<SkipDestructors>::with_policy(ArenaConfig::default()).unwrap();
/// arena.append("%s=%d", ("answer", 42)).unwrap();
/// assert_eq!(arena.len(), 1);
/// ```
#[derive(Clone, Copy, Debug)]
pub enum SkipDestructors {}

impl sealed::Sealed for RunDestructors {}
impl sealed::Sealed for SkipDestructors {}

impl TeardownPolicy for RunDestructors {
    const RUN_DESTRUCTORS: bool = true;
}

impl TeardownPolicy for SkipDestructors {
    const RUN_DESTRUCTORS: bool = false;
}

/// Token tuples a policy accepts into its arena.
///
/// [`RunDestructors`] accepts every tuple. [`SkipDestructors`] accepts
/// only `Copy` tuples, so skipping their destructors cannot leak.
pub trait Admits<A>: TeardownPolicy {}

impl<A> Admits<A> for RunDestructors {}

impl<A: Copy> Admits<A> for SkipDestructors {}
