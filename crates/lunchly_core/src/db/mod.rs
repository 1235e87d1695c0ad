//! SQLite store lifecycle for Lunchly core.
//!
//! # Responsibility
//! - Open, configure and close the connection that repositories borrow.
//! - Install SQL functions the repositories rely on (`fold_case`).
//! - Bring the `customers`/`reservations` schema up to date.
//!
//! # Invariants
//! - Repositories only receive connections produced by `open_db*`, so
//!   `foreign_keys=ON`, `fold_case` and the latest schema are always present.
//! - Core keeps no global connection; the caller owns open/close.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod functions;
pub mod migrations;
mod open;

pub use open::{close_db, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Store lifecycle failure.
#[derive(Debug)]
pub enum DbError {
    /// Opening, configuring or querying the connection failed.
    Sqlite(rusqlite::Error),
    /// A schema migration failed; the whole upgrade was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Closing the connection failed, typically with statements still live.
    Close(rusqlite::Error),
}

impl DbError {
    /// Schema version the failure is tied to, when there is one.
    pub fn schema_version(&self) -> Option<u32> {
        match self {
            Self::Migration { version, .. } => Some(*version),
            Self::UnsupportedSchemaVersion { db_version, .. } => Some(*db_version),
            Self::Sqlite(_) | Self::Close(_) => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "migration {version:04}_{name} failed: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "lunchly database is at schema {db_version}, this build supports up to {latest_supported}"
            ),
            Self::Close(err) => write!(f, "failed to close lunchly database: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Close(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
