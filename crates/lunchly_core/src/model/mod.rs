//! Typed domain records for the restaurant's customers and reservations.
//!
//! # Responsibility
//! - Define canonical data structures hydrated from and persisted to SQL rows.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - A record hydrated from storage always carries `id = Some(_)`.
//! - A record built in memory keeps `id = None` until it is saved.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer;
pub mod reservation;

/// Field-level validation failure for customer/reservation records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Phone contains characters outside the accepted dial-string set.
    InvalidPhone(String),
    /// Party size must be at least one guest.
    InvalidGuestCount(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::InvalidPhone(value) => write!(f, "invalid phone number `{value}`"),
            Self::InvalidGuestCount(count) => {
                write!(f, "reservation needs at least one guest, got {count}")
            }
        }
    }
}

impl Error for ValidationError {}
