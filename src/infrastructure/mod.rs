//! Infrastructure layer: storage implementation and DI container
//!
//! This layer implements the storage boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use di::ServiceContainer;
pub use error::SqliteResultExt;
pub use sqlite::SqliteUserRepository;
pub use traits::UserRepository;
