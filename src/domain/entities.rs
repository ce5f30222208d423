//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::DomainError;

/// Identifier of a stored user.
///
/// Assigned once by the store when the user is created and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // hyphenated lowercase, which is also the stored form
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidUserId(s.to_string()))
    }
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Unique per user (enforced by the storage schema)
    pub email: String,
    pub username: String,
}

impl User {
    /// Single-line summary used by list output.
    pub fn summary(&self) -> String {
        format!("{} ({}) [ID: {}]", self.username, self.email, self.id)
    }
}
