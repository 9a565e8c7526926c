//! I/O helpers for flipper commands.

pub mod config;
