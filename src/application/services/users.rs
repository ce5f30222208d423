//! User management service
//!
//! The caller-facing data store: generates identifiers, delegates the
//! parameterized queries to a [`UserRepository`] and turns missing rows into
//! domain errors.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{DomainError, User, UserId};
use crate::infrastructure::traits::UserRepository;

/// Service for creating and reading users.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Create a user with a freshly generated identifier.
    ///
    /// Duplicate emails are rejected by the storage schema and surface as
    /// [`ApplicationError::Constraint`](crate::application::ApplicationError::Constraint).
    #[instrument(skip(self))]
    pub fn create_user(&self, email: &str, username: &str) -> ApplicationResult<User> {
        let user = User {
            id: UserId::generate(),
            email: email.to_string(),
            username: username.to_string(),
        };
        self.repo.insert_user(&user)?;
        debug!(id = %user.id, "user created");
        Ok(user)
    }

    /// Fetch a single user by identifier.
    #[instrument(skip(self))]
    pub fn get_user(&self, id: &UserId) -> ApplicationResult<User> {
        self.repo
            .find_user(id)?
            .ok_or_else(|| DomainError::UserNotFound(*id).into())
    }

    /// Fetch up to `limit` users in creation order.
    #[instrument(skip(self))]
    pub fn get_users(&self, limit: u32) -> ApplicationResult<Vec<User>> {
        let users = self.repo.list_users(limit)?;
        debug!(count = users.len(), "users fetched");
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::{ApplicationError, ErrorKind};

    /// Vec-backed repository enforcing email uniqueness like the SQL schema.
    #[derive(Default)]
    struct MemoryRepository {
        rows: Mutex<Vec<User>>,
    }

    impl UserRepository for MemoryRepository {
        fn insert_user(&self, user: &User) -> ApplicationResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|u| u.email == user.email) {
                return Err(ApplicationError::constraint(
                    "create user",
                    "UNIQUE constraint failed: users.email",
                ));
            }
            rows.push(user.clone());
            Ok(())
        }

        fn find_user(&self, id: &UserId) -> ApplicationResult<Option<User>> {
            Ok(self.rows.lock().unwrap().iter().find(|u| u.id == *id).cloned())
        }

        fn list_users(&self, limit: u32) -> ApplicationResult<Vec<User>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().take(limit as usize).cloned().collect())
        }

        fn close(&self) -> ApplicationResult<()> {
            Ok(())
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryRepository::default()))
    }

    #[test]
    fn given_new_user_when_created_then_id_is_generated() {
        let svc = service();

        let user = svc.create_user("a@x.com", "alice").unwrap();

        assert!(!user.id.is_nil());
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.username, "alice");
        assert_eq!(svc.get_user(&user.id).unwrap(), user);
    }

    #[test]
    fn given_two_users_when_created_then_ids_differ() {
        let svc = service();

        let a = svc.create_user("a@x.com", "alice").unwrap();
        let b = svc.create_user("b@x.com", "bob").unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn given_unknown_id_when_get_user_then_not_found() {
        let svc = service();

        let err = svc.get_user(&UserId::generate()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn given_repository_error_when_creating_then_propagated_unchanged() {
        let svc = service();
        svc.create_user("a@x.com", "alice").unwrap();

        let err = svc.create_user("a@x.com", "other").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Constraint);
    }
}
