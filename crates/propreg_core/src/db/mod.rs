//! Listing store on SQLite.
//!
//! # Responsibility
//! - Hand out connections whose `properties` / `user_properties` schema is
//!   current.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; a store written by a
//!   newer binary is refused, never downgraded.
//! - Pending migrations run in one transaction: a failing step leaves the
//!   store at its previous version.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the listing store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Store schema is ahead of this binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Migration `version` failed; nothing of the batch was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "listing store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "listing store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Migration { version, source } => {
                write!(f, "listing store migration {version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
