//! Flipper runner game: flip edges between vertex groups until the runner
//! is isolated.
//!
//! Each turn the player flips edges of a working copy of the graph, then a
//! runner greedily steps to the neighbor (in the previous graph) that has
//! the highest degree in the flipped graph. The player wins when the runner
//! lands on a vertex with no edges.
//!
//! - **[`core`]**: Pure, deterministic logic (graphs, flips, runner moves,
//!   turn transitions). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config files).
//!
//! [`session`] bundles a game with its partitions and random source; [`play`]
//! and [`render`] implement the interactive `flipper play` command.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod play;
pub mod render;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
