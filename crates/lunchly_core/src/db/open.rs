//! Connection lifecycle utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and SQL functions required by core.
//! - Trigger schema migrations before returning a usable connection.
//! - Close connections explicitly at shutdown.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and `fold_case` installed.
//! - Returned connections have migrations fully applied.

use super::functions::register_functions;
use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// Each call yields an independent, empty database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Closes a connection previously returned by [`open_db`] or
/// [`open_db_in_memory`].
///
/// Repositories borrow the connection, so they must be dropped before this
/// call compiles.
pub fn close_db(conn: Connection) -> DbResult<()> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            error!(
                "event=db_close module=db status=error error_code=db_close_failed error={}",
                err
            );
            Err(DbError::Close(err))
        }
    }
}

fn open_with<F>(mode: &'static str, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(previous_version) => {
            info!(
                "event=db_open module=db status=ok mode={} previous_schema={} duration_ms={}",
                mode,
                previous_version,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<u32> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    register_functions(conn)?;
    apply_migrations(conn)
}
