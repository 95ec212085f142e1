//! Error types for the account database.
//!
//! Expected outcomes such as a missing field, a record that is not in the
//! store or a search without a hit are not errors; they surface as `Option`
//! or `bool`. Only I/O-facing failures end up here.

use std::path::PathBuf;
use thiserror::Error;

/// Stable classification of a [`DbError`], for callers that pick a message
/// or an exit code without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ReadOnly,
    WrongPassword,
    NotFound,
    CorruptOrUnreadable,
    AllocOrConversion,
    Io,
}

/// Errors raised by the account database and its storage engines.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database '{}' is open read-only", path.display())]
    ReadOnly { path: PathBuf },

    #[error("incorrect password for '{}'", path.display())]
    WrongPassword { path: PathBuf },

    #[error("database '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("database '{}' is corrupt or unreadable: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to convert records for storage: {0}")]
    Conversion(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::ReadOnly { .. } => ErrorKind::ReadOnly,
            DbError::WrongPassword { .. } => ErrorKind::WrongPassword,
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::Corrupt { .. } => ErrorKind::CorruptOrUnreadable,
            DbError::Conversion(_) => ErrorKind::AllocOrConversion,
            DbError::Io { .. } => ErrorKind::Io,
        }
    }
}
