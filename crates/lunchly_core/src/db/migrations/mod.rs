//! Schema history for the `customers` and `reservations` tables.
//!
//! # Invariants
//! - Versions are contiguous from 1; the schema version lives in
//!   `PRAGMA user_version`.
//! - An upgrade runs every pending step in one transaction; a failing step
//!   leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "customers",
        sql: include_str!("0001_customers.sql"),
    },
    Migration {
        version: 2,
        name: "reservations",
        sql: include_str!("0002_reservations.sql"),
    },
];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Reads the schema version stored in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Upgrades the schema to [`latest_version`] and returns the version the
/// file was at before the call.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build.
/// - `Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending = &MIGRATIONS[from as usize..];
    if pending.is_empty() {
        return Ok(from);
    }

    let tx = conn.transaction()?;
    for migration in pending {
        run_step(&tx, migration)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(from)
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    let Migration { version, name, sql } = *migration;
    debug!("event=db_migrate_step module=db status=start version={version} name={name}");
    tx.execute_batch(sql)
        .and_then(|()| tx.pragma_update(None, "user_version", version))
        .map_err(|source| DbError::Migration {
            version,
            name,
            source,
        })
}
