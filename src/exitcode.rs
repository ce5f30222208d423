//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any failure: storage, constraint, not-found, configuration or usage
pub const FAILURE: i32 = 1;
