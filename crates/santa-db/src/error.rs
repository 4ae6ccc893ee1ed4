use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("schema setup failed: {0}")]
    Migration(#[source] rusqlite::Error),

    /// A statement failed. `op` names the store operation that issued it.
    #[error("{op} failed: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("unknown config option: {0}")]
    UnknownConfigOption(String),
}

impl DbError {
    /// Name of the failed store operation, if this is a statement failure.
    pub fn op(&self) -> Option<&'static str> {
        match self {
            DbError::Storage { op, .. } => Some(op),
            _ => None,
        }
    }
}
