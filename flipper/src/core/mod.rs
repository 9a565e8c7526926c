//! Deterministic, pure game logic.
//!
//! Core modules must be free of I/O side effects. Randomness only enters
//! through caller-supplied `Rng` values, so seeded runs are reproducible.

pub mod flip;
pub mod game;
pub mod graph;
pub mod invariants;
pub mod partition;
pub mod runner;
