//! Customer domain model.
//!
//! # Responsibility
//! - Define the customer record shared by listing, search and reporting.
//! - Validate name and phone fields before persistence.
//!
//! # Invariants
//! - `first_name` and `last_name` are never blank on a valid record.
//! - `phone`, when set, is a dial string containing at least one digit,
//!   optionally ending in an `x<digits>` extension.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Digits plus common separators, then an optional trailing extension
// such as `555-0100 x12`.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9 ().-]*[0-9][0-9 ().-]*(?:x[0-9]+)?$").expect("valid phone regex")
});

/// Surrogate key assigned by the store on first save.
pub type CustomerId = i64;

/// Customer of the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// `None` until the record is inserted.
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    /// Creates an unsaved customer with no contact details.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            notes: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns whether this record has been persisted at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - `EmptyField` when a name is blank.
    /// - `InvalidPhone` when `phone` is set but is not a dial string.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("last_name"));
        }
        if let Some(phone) = self.phone.as_deref() {
            if !PHONE_RE.is_match(phone.trim()) {
                return Err(ValidationError::InvalidPhone(phone.to_string()));
            }
        }
        Ok(())
    }
}

/// One row of the best-customers report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRanking {
    pub customer: Customer,
    pub reservation_count: i64,
}
