pub mod error;
pub mod migrations;
pub mod options;
pub mod queries;

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

pub use error::{DbError, Result};
pub use options::{ConfigOption, UserFilter};

/// Store for users, pairs, deleted users and the bot config.
///
/// Every statement goes through the one connection, so they run in lock
/// order with no interleaving.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // WAL mode so readers in other processes don't block the bot
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })
        .map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| DbError::Open {
            path: ":memory:".into(),
            source,
        })?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` against the connection, tagging any SQLite error with `op`.
    pub fn with_conn<F, T>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn).map_err(|source| DbError::Storage { op, source })
    }

    /// Like [`Database::with_conn`], but with mutable access for transactions.
    pub fn with_conn_mut<F, T>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&mut conn).map_err(|source| DbError::Storage { op, source })
    }
}
