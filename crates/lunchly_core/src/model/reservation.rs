//! Reservation domain model.
//!
//! # Invariants
//! - `customer_id` always refers to a persisted customer once stored.
//! - `num_guests` is at least one.

use super::customer::CustomerId;
use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type ReservationId = i64;

/// Table booking made by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// `None` until the record is inserted.
    pub id: Option<ReservationId>,
    pub customer_id: CustomerId,
    /// Unix epoch milliseconds.
    pub start_at: i64,
    pub num_guests: i64,
    pub notes: Option<String>,
}

impl Reservation {
    /// Creates an unsaved reservation without notes.
    pub fn new(customer_id: CustomerId, start_at: i64, num_guests: i64) -> Self {
        Self {
            id: None,
            customer_id,
            start_at,
            num_guests,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_guests < 1 {
            return Err(ValidationError::InvalidGuestCount(self.num_guests));
        }
        Ok(())
    }
}
