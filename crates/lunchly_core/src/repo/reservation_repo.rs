//! Reservation repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and per-customer lookup APIs over `reservations`.
//!
//! # Invariants
//! - Write paths must call `Reservation::validate()` before SQL mutations.
//! - A reservation is never written for a customer id without a row.
//! - Per-customer listing is ordered by `start_at ASC, id ASC`.

use crate::model::customer::CustomerId;
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::customer_repo::{RecordKind, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    customer_id,
    start_at,
    num_guests,
    notes
FROM reservations";

/// Repository interface for reservation operations.
pub trait ReservationRepository {
    fn create_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId>;
    fn update_reservation(&self, reservation: &Reservation) -> RepoResult<()>;
    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;
    fn list_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Reservation>>;
    fn count_for_customer(&self, customer_id: CustomerId) -> RepoResult<i64>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn ensure_customer_exists(&self, customer_id: CustomerId) -> RepoResult<()> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1);",
            [customer_id],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Customer,
                id: customer_id,
            });
        }
        Ok(())
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn create_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId> {
        reservation.validate()?;
        self.ensure_customer_exists(reservation.customer_id)?;

        self.conn.execute(
            "INSERT INTO reservations (customer_id, start_at, num_guests, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                reservation.customer_id,
                reservation.start_at,
                reservation.num_guests,
                reservation.notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_reservation(&self, reservation: &Reservation) -> RepoResult<()> {
        let id = reservation
            .id
            .ok_or(RepoError::Unsaved(RecordKind::Reservation))?;
        reservation.validate()?;
        self.ensure_customer_exists(reservation.customer_id)?;

        let changed = self.conn.execute(
            "UPDATE reservations
             SET
                customer_id = ?1,
                start_at = ?2,
                num_guests = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                reservation.customer_id,
                reservation.start_at,
                reservation.num_guests,
                reservation.notes.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Reservation,
                id,
            });
        }

        Ok(())
    }

    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reservation_row(row)?));
        }

        Ok(None)
    }

    fn list_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}
             WHERE customer_id = ?1
             ORDER BY start_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([customer_id])?;
        let mut reservations = Vec::new();

        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }

        Ok(reservations)
    }

    fn count_for_customer(&self, customer_id: CustomerId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM reservations WHERE customer_id = ?1;",
            [customer_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_reservation_row(row: &Row<'_>) -> RepoResult<Reservation> {
    let id: ReservationId = row.get("id")?;
    let reservation = Reservation {
        id: Some(id),
        customer_id: row.get("customer_id")?,
        start_at: row.get("start_at")?,
        num_guests: row.get("num_guests")?,
        notes: row.get("notes")?,
    };
    reservation
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("reservations.id={id}: {err}")))?;
    Ok(reservation)
}
