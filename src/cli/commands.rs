//! Command dispatch
//!
//! Each `users` command opens one store, performs exactly one operation and
//! closes the store again, whether or not the operation succeeded.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, error, info, instrument, Dispatch};

use crate::application::services::UserService;
use crate::application::ApplicationResult;
use crate::buildinfo;
use crate::cli::args::{Cli, Commands, ConfigCommands, UserCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings};
use crate::domain::{User, UserId};
use crate::infrastructure::ServiceContainer;
use crate::logging::{self, LogFormat};

/// Everything a command needs besides its own arguments.
pub struct CommandContext {
    /// Explicit `--config` file, if any
    pub config_file: Option<PathBuf>,
    /// Logger for this invocation; commands run with it as the default dispatcher
    pub logger: Dispatch,
}

impl CommandContext {
    pub fn new(config_file: Option<PathBuf>, logger: Dispatch) -> Self {
        Self {
            config_file,
            logger,
        }
    }

    /// Load settings on demand. Only commands that read them call this.
    pub fn settings(&self) -> CliResult<Settings> {
        Ok(Settings::load(self.config_file.as_deref())?)
    }
}

/// Build the logger from the global flags.
pub fn setup(cli: &Cli) -> CommandContext {
    let logger = logging::build_dispatch(cli.verbose, LogFormat::from_json_flag(cli.json));
    CommandContext::new(cli.config.clone(), logger)
}

/// Run the parsed command under the context's logger.
///
/// Failures are logged here with their kind; printing and exiting is left to
/// the caller.
pub fn execute_command(cli: &Cli, ctx: &CommandContext) -> CliResult<()> {
    tracing::dispatcher::with_default(&ctx.logger, || {
        dispatch(cli, ctx).inspect_err(|e| {
            error!(kind = %e.kind(), error = %e, "command failed");
        })
    })
}

fn dispatch(cli: &Cli, ctx: &CommandContext) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Version) => _version(),
        Some(Commands::Users { db, command }) => {
            let settings = ctx.settings()?.with_db_path(db.as_deref());
            match command {
                UserCommands::Create { email, username } => {
                    _users_create(settings, email, username)
                }
                UserCommands::List { limit } => {
                    let limit = limit.unwrap_or(settings.default_limit);
                    _users_list(settings, limit)
                }
                UserCommands::Get { id } => _users_get(settings, id),
            }
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&ctx.settings()?),
            ConfigCommands::Path => _config_path(cli.config.as_deref()),
        },
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Usage(format!("cannot print help: {e}"))),
    }
}

/// Open the store, run `op`, and close the store on every path.
///
/// A failed close is logged but does not change the outcome of `op`.
fn with_users<T>(
    settings: Settings,
    op: impl FnOnce(&UserService) -> ApplicationResult<T>,
) -> CliResult<T> {
    let db = settings.db_path.clone();
    let container = ServiceContainer::open(settings)?;
    debug!(db = %db.display(), "store opened");

    let result = op(&container.users);

    if let Err(e) = container.close() {
        error!(db = %db.display(), error = %e, "Failed to close database");
    }
    Ok(result?)
}

fn _version() -> CliResult<()> {
    output::info(&buildinfo::version_line());
    Ok(())
}

#[instrument(skip(settings))]
fn _users_create(settings: Settings, email: &str, username: &str) -> CliResult<()> {
    let user = with_users(settings, |users| users.create_user(email, username))?;
    info!(id = %user.id, "user created");
    output::success(&format!(
        "User created successfully: {} ({})",
        user.username, user.email
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn _users_list(settings: Settings, limit: u32) -> CliResult<()> {
    let users = with_users(settings, |users| users.get_users(limit))?;
    print_users(&users);
    Ok(())
}

#[instrument(skip(settings))]
fn _users_get(settings: Settings, id: &str) -> CliResult<()> {
    let id: UserId = id
        .parse()
        .map_err(|e| CliError::InvalidArgs(format!("{e}")))?;
    let user = with_users(settings, |users| users.get_user(&id))?;
    output::item(&user.summary());
    Ok(())
}

fn print_users(users: &[User]) {
    output::header(&format!("Found {} users:", users.len()));
    for user in users {
        output::item(&user.summary());
    }
}

fn _config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _config_path(explicit: Option<&Path>) -> CliResult<()> {
    match explicit {
        Some(path) => output::info(&path.display()),
        None => match config::global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info(&"no config directory available"),
        },
    }
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
