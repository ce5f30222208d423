//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::UserId;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}
