//! Application-level errors (wraps domain errors)

use std::fmt;

use thiserror::Error;

use crate::domain::DomainError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("database unavailable: {context}: {source}")]
    Connection {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("constraint violation: {context}: {source}")]
    Constraint {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Create a connection error with context.
    pub fn connection(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create a constraint error with context.
    pub fn constraint(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Constraint {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::UserNotFound(_)) => ErrorKind::NotFound,
            Self::Domain(DomainError::InvalidUserId(_)) => ErrorKind::Argument,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Constraint { .. } => ErrorKind::Constraint,
            Self::Config { .. } => ErrorKind::Config,
        }
    }
}

/// Caller-visible error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cannot open, ping, or talk to the database file
    Connection,
    /// A write violated a schema constraint
    Constraint,
    /// A read by identifier matched no row
    NotFound,
    /// Wrong number or shape of arguments
    Argument,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connection => "connection",
            Self::Constraint => "constraint",
            Self::NotFound => "not_found",
            Self::Argument => "argument",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[test]
    fn given_each_variant_when_kind_then_maps_to_taxonomy() {
        assert_eq!(
            ApplicationError::from(DomainError::UserNotFound(UserId::generate())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ApplicationError::from(DomainError::InvalidUserId("x".into())).kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            ApplicationError::connection("open database", "boom").kind(),
            ErrorKind::Connection
        );
        assert_eq!(
            ApplicationError::constraint("create user", "dup").kind(),
            ErrorKind::Constraint
        );
    }

    #[test]
    fn given_constraint_error_when_displayed_then_includes_context_and_cause() {
        let err = ApplicationError::constraint(
            "create user",
            "UNIQUE constraint failed: users.email",
        );
        assert_eq!(
            err.to_string(),
            "constraint violation: create user: UNIQUE constraint failed: users.email"
        );
    }
}
