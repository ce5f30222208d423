//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Manage user records in a local SQLite database
#[derive(Parser, Debug)]
#[command(name = "userdb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output logs in JSON format (default: text)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/userdb/userdb.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Version info
    Version,

    /// User management commands
    Users {
        /// Path to SQLite database file [default: users.db]
        #[arg(long, global = true, value_hint = ValueHint::FilePath)]
        db: Option<PathBuf>,

        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a new user
    Create {
        /// Email address (must be unique)
        email: String,
        /// Display name
        username: String,
    },

    /// List users
    List {
        /// Maximum number of users to list [default: 10]
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show a single user
    Get {
        /// User id (UUID)
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
