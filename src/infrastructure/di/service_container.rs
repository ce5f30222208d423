//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::UserService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::sqlite::SqliteUserRepository;
use crate::infrastructure::traits::UserRepository;

/// Container holding all application services.
///
/// Owns exactly one storage connection; scope it to a single command and
/// call [`ServiceContainer::close`] when done.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Storage abstraction
    pub repo: Arc<dyn UserRepository>,

    pub users: UserService,
}

impl ServiceContainer {
    /// Open the database named by `settings.db_path` and wire services onto it.
    pub fn open(settings: Settings) -> ApplicationResult<Self> {
        let repo = SqliteUserRepository::open(&settings.db_path)?;
        Ok(Self::with_deps(settings, Arc::new(repo)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, repo: Arc<dyn UserRepository>) -> Self {
        let settings = Arc::new(settings);
        let users = UserService::new(Arc::clone(&repo));

        Self {
            settings,
            repo,
            users,
        }
    }

    /// Release the storage connection. Safe to call more than once.
    pub fn close(&self) -> ApplicationResult<()> {
        debug!(db = %self.settings.db_path.display(), "closing service container");
        self.repo.close()
    }
}
