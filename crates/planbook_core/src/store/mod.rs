//! Property-graph store over SQLite.
//!
//! # Responsibility
//! - Own the connection to the underlying graph database.
//! - Execute parametrized read/write operations and return typed records.
//!
//! # Invariants
//! - Every user-supplied value is passed as a bound parameter, never
//!   interpolated into SQL text.
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Writes of one `execute_write` call are atomic.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod graph;
pub mod migrations;
mod open;

pub use graph::{
    GraphStore, Hop, NodeId, NodeMatch, NodeRecord, NodeRef, PathQuery, PropMap, PropValue,
    WriteOp,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for connectivity, transaction and constraint failures.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite failure (connectivity, I/O, statement errors).
    Sqlite(rusqlite::Error),
    /// A schema constraint rejected the write (e.g. unique user id).
    Constraint(String),
    /// Database was produced by a newer binary than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Persisted node data cannot be decoded into a typed record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted graph data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Constraint(_) => None,
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => Self::Sqlite(value),
        }
    }
}
