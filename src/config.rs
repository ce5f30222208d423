//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/userdb/userdb.toml`, or the file passed via `--config`
//! 3. Environment variables: `USERDB_*` prefix
//! 4. Command-line flags (`--db`, `--limit`), applied by the CLI layer

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "users.db";

/// Row limit for `users list` when `--limit` is not given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Unified configuration for userdb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Default row limit for listing users
    pub default_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub db_path: Option<PathBuf>,
    pub default_limit: Option<u32>,
}

/// Get the XDG config directory for userdb.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "userdb").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("userdb.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; replaces the global file and must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let env = Environment::with_prefix("USERDB");
        Self::load_with_env(config_file, env)
    }

    fn load_with_env(
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file: explicit one is required, global one is optional
        match config_file {
            Some(path) => {
                debug!("loading config from {}", path.display());
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("loading global config from {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths()?;

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            db_path: overlay
                .db_path
                .clone()
                .unwrap_or_else(|| self.db_path.clone()),
            default_limit: overlay.default_limit.unwrap_or(self.default_limit),
        }
    }

    /// Apply USERDB_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("db_path"))? {
            settings.db_path = PathBuf::from(val);
        }
        if let Some(val) = optional(config.get::<u32>("default_limit"))? {
            settings.default_limit = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) -> Result<(), ApplicationError> {
        let raw = self.db_path.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
            message: format!("expand db_path {raw}: {e}"),
        })?;
        self.db_path = PathBuf::from(expanded.into_owned());
        Ok(())
    }

    /// Override the database path when a flag was given.
    pub fn with_db_path(mut self, db_path: Option<&Path>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path.to_path_buf();
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// Treat a missing key as "not set" and every other failure as an error.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
