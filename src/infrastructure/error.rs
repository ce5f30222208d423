//! Storage error classification
//!
//! Maps rusqlite errors onto the application error taxonomy with the name of
//! the failing operation attached.

use rusqlite::ErrorCode;

use crate::application::{ApplicationError, ApplicationResult};

/// Classify a rusqlite error raised while performing `operation`.
pub fn classify(operation: &str, err: rusqlite::Error) -> ApplicationError {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => ApplicationError::constraint(operation, err),
        _ => ApplicationError::connection(operation, err),
    }
}

/// Extension trait for converting `rusqlite::Result` to `ApplicationResult` with context.
pub trait SqliteResultExt<T> {
    /// Add operation context to a storage error.
    ///
    /// # Example
    /// ```ignore
    /// conn.execute(INSERT_USER, params)
    ///     .with_operation("create user")?;
    /// ```
    fn with_operation(self, operation: &str) -> ApplicationResult<T>;
}

impl<T> SqliteResultExt<T> for rusqlite::Result<T> {
    fn with_operation(self, operation: &str) -> ApplicationResult<T> {
        self.map_err(|e| classify(operation, e))
    }
}
