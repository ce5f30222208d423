//! I/O boundary traits for testability
//!
//! These traits abstract the storage engine, allowing services
//! to be tested with in-memory implementations.

use crate::application::ApplicationResult;
use crate::domain::{User, UserId};

/// Parameterized queries over the `users` table.
///
/// Implementations map engine errors onto the application taxonomy
/// (`Connection`, `Constraint`); a missing row is `Ok(None)`, not an error.
pub trait UserRepository: Send + Sync {
    /// Insert a fully formed user row.
    fn insert_user(&self, user: &User) -> ApplicationResult<()>;

    /// Select one user by primary key.
    fn find_user(&self, id: &UserId) -> ApplicationResult<Option<User>>;

    /// Select at most `limit` users in insertion order.
    fn list_users(&self, limit: u32) -> ApplicationResult<Vec<User>>;

    /// Release the underlying connection.
    /// Closing an already closed repository succeeds.
    fn close(&self) -> ApplicationResult<()>;
}
