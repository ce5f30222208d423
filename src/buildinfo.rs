//! Build metadata reported by `userdb version`
//!
//! Commit and date are stamped at compile time:
//!
//! ```text
//! USERDB_BUILD_COMMIT=$(git rev-parse --short HEAD) \
//! USERDB_BUILD_DATE=$(date -u +%Y-%m-%dT%H:%M:%SZ) cargo build --release
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const COMMIT: &str = match option_env!("USERDB_BUILD_COMMIT") {
    Some(commit) => commit,
    None => "none",
};

pub const DATE: &str = match option_env!("USERDB_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

/// `<version> <commit> <date>`
pub fn version_line() -> String {
    format!("{VERSION} {COMMIT} {DATE}")
}
