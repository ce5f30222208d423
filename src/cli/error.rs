//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::{ApplicationError, ErrorKind};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Application(e) => e.kind(),
            CliError::InvalidArgs(_) | CliError::Usage(_) => ErrorKind::Argument,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        crate::exitcode::FAILURE
    }
}
