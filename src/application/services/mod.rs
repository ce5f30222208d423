//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (UserRepository)
//! but are themselves concrete structs, not traits.

mod users;

pub use users::UserService;
