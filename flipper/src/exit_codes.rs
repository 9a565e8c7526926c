//! Stable exit codes for flipper CLI commands.

/// Command succeeded; for `play`, the runner was isolated.
pub const OK: i32 = 0;
/// Command failed due to invalid config, arguments or I/O errors.
pub const INVALID: i32 = 1;
/// `flipper play` ended before the runner was isolated.
pub const ABANDONED: i32 = 2;
