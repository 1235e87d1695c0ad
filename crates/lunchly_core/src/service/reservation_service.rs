//! Reservation use-case service.
//!
//! # Invariants
//! - Saving dispatches on `id` the same way customer saves do.

use crate::model::customer::CustomerId;
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::customer_repo::{RecordKind, RepoError, RepoResult};
use crate::repo::reservation_repo::ReservationRepository;
use log::info;

/// Use-case service wrapper for reservation operations.
pub struct ReservationService<R: ReservationRepository> {
    repo: R,
}

impl<R: ReservationRepository> ReservationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new reservation or updates an existing one, assigning the
    /// generated id on insert.
    pub fn save_reservation(&self, reservation: &mut Reservation) -> RepoResult<ReservationId> {
        let id = match reservation.id {
            None => {
                let id = self.repo.create_reservation(reservation)?;
                reservation.id = Some(id);
                id
            }
            Some(id) => {
                self.repo.update_reservation(reservation)?;
                id
            }
        };
        info!(
            "event=reservation_save module=service status=ok reservation_id={} customer_id={}",
            id, reservation.customer_id
        );
        Ok(id)
    }

    /// Gets one reservation by id, failing with `NotFound` when missing.
    pub fn get_reservation(&self, id: ReservationId) -> RepoResult<Reservation> {
        self.repo
            .get_reservation(id)?
            .ok_or(RepoError::NotFound {
                kind: RecordKind::Reservation,
                id,
            })
    }

    pub fn list_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Reservation>> {
        self.repo.list_for_customer(customer_id)
    }
}
