//! userdb: manage user records in a local SQLite database
//!
//! Layers, innermost first: [`domain`] (entities, no I/O), [`application`]
//! (the user service and error taxonomy), [`infrastructure`] (rusqlite
//! repository and wiring) and [`cli`] (argument parsing and dispatch).

pub mod application;
pub mod buildinfo;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod logging;
pub mod util;
