//! SQLite-backed user repository
//!
//! One rusqlite connection per repository, held for the lifetime of a single
//! command. The schema is created on open if it is missing.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{User, UserId};
use crate::infrastructure::error::SqliteResultExt;
use crate::infrastructure::traits::UserRepository;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id       TEXT PRIMARY KEY NOT NULL,
    email    TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL
);
"#;

const INSERT_USER: &str = "INSERT INTO users (id, email, username) VALUES (?1, ?2, ?3)";

const SELECT_USER: &str = "SELECT id, email, username FROM users WHERE id = ?1";

// rowid follows insertion order, which gives a stable listing order
const SELECT_USERS: &str = "SELECT id, email, username FROM users ORDER BY rowid LIMIT ?1";

/// User repository over a single SQLite database file.
pub struct SqliteUserRepository {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl SqliteUserRepository {
    /// Open (creating if absent) the database at `path`, ping it and ensure the schema.
    #[instrument]
    pub fn open(path: &Path) -> ApplicationResult<Self> {
        let conn = Connection::open(path)
            .with_operation(&format!("open database {}", path.display()))?;
        Self::init(conn, path.to_path_buf())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> ApplicationResult<Self> {
        let conn = Connection::open_in_memory().with_operation("open in-memory database")?;
        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> ApplicationResult<Self> {
        // reading the schema table touches the file header, so a
        // non-database file fails here rather than on first use
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .with_operation(&format!("ping database {}", path.display()))?;

        conn.execute_batch(SCHEMA)
            .with_operation(&format!("initialize schema in {}", path.display()))?;

        debug!(path = %path.display(), "database ready");
        Ok(Self {
            path,
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }

    fn lock(&self) -> ApplicationResult<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|_| ApplicationError::connection("lock database", "connection mutex poisoned"))
    }

    /// Run `f` against the open connection, classifying its errors under `operation`.
    fn with_conn<T>(
        &self,
        operation: &str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> ApplicationResult<T> {
        let guard = self.lock()?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| ApplicationError::connection(operation, "database connection is closed"))?;
        f(conn).with_operation(operation)
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let raw_id: String = row.get(0)?;
    let id = raw_id
        .parse::<UserId>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    Ok(User {
        id,
        email: row.get(1)?,
        username: row.get(2)?,
    })
}

impl UserRepository for SqliteUserRepository {
    fn insert_user(&self, user: &User) -> ApplicationResult<()> {
        self.with_conn("create user", |conn| {
            conn.execute(
                INSERT_USER,
                params![user.id.to_string(), user.email, user.username],
            )
        })?;
        Ok(())
    }

    fn find_user(&self, id: &UserId) -> ApplicationResult<Option<User>> {
        self.with_conn("get user", |conn| {
            conn.query_row(SELECT_USER, params![id.to_string()], row_to_user)
                .optional()
        })
    }

    fn list_users(&self, limit: u32) -> ApplicationResult<Vec<User>> {
        self.with_conn("get users", |conn| {
            let mut stmt = conn.prepare(SELECT_USERS)?;
            let users = stmt
                .query_map(params![limit], row_to_user)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        })
    }

    fn close(&self) -> ApplicationResult<()> {
        let mut guard = self.lock()?;
        match guard.take() {
            Some(conn) => {
                debug!(path = %self.path.display(), "closing database");
                conn.close()
                    .map_err(|(_, e)| e)
                    .with_operation(&format!("close database {}", self.path.display()))
            }
            None => Ok(()),
        }
    }
}
