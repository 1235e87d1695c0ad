//! Customer use-case service.
//!
//! # Responsibility
//! - Provide the customer entry points used by route handlers: listing,
//!   lookup, name search, best-customer report and save.
//! - Translate missing rows into `RepoError::NotFound`.
//! - Delegate reservation lookups to the reservation repository.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - An empty search result is a valid outcome, never `NotFound`.
//! - Log events carry ids only, never names or contact details.

use crate::model::customer::{Customer, CustomerId, CustomerRanking};
use crate::model::reservation::Reservation;
use crate::repo::customer_repo::{
    CustomerRepository, NameFilter, RecordKind, RepoError, RepoResult,
};
use crate::repo::reservation_repo::ReservationRepository;
use log::{info, warn};

/// Number of rows in the best-customers report.
pub const BEST_CUSTOMERS_LIMIT: u32 = 10;

/// Use-case service for customer operations.
pub struct CustomerService<C: CustomerRepository, R: ReservationRepository> {
    customers: C,
    reservations: R,
}

impl<C: CustomerRepository, R: ReservationRepository> CustomerService<C, R> {
    pub fn new(customers: C, reservations: R) -> Self {
        Self {
            customers,
            reservations,
        }
    }

    /// Lists all customers ordered by last name, then first name.
    pub fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        self.customers.list_customers()
    }

    /// Gets one customer by id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` (status 404) when no row has this id.
    pub fn get_customer(&self, id: CustomerId) -> RepoResult<Customer> {
        match self.customers.get_customer(id)? {
            Some(customer) => Ok(customer),
            None => {
                warn!("event=customer_not_found module=service status=error customer_id={id}");
                Err(RepoError::NotFound {
                    kind: RecordKind::Customer,
                    id,
                })
            }
        }
    }

    /// Case-insensitive substring search by name.
    ///
    /// # Contract
    /// - Both terms: first name matches `term1` AND last name matches `term2`.
    /// - One term: first OR last name matches it.
    /// - No usable term: every customer.
    pub fn filter_by_name(&self, term1: &str, term2: Option<&str>) -> RepoResult<Vec<Customer>> {
        self.customers
            .filter_by_name(&NameFilter::from_terms(term1, term2))
    }

    /// Top customers by reservation count, most active first.
    pub fn best_customers(&self) -> RepoResult<Vec<CustomerRanking>> {
        self.customers.best_customers(BEST_CUSTOMERS_LIMIT)
    }

    /// Inserts a new customer or updates an existing one.
    ///
    /// # Contract
    /// - `id == None`: insert, then assign the generated id to `customer`.
    /// - `id == Some(_)`: update that row; last writer wins.
    /// - Returns the customer id in both cases.
    pub fn save_customer(&self, customer: &mut Customer) -> RepoResult<CustomerId> {
        let id = match customer.id {
            None => {
                let id = self.customers.create_customer(customer)?;
                customer.id = Some(id);
                info!("event=customer_save module=service status=ok op=insert customer_id={id}");
                id
            }
            Some(id) => {
                self.customers.update_customer(customer)?;
                info!("event=customer_save module=service status=ok op=update customer_id={id}");
                id
            }
        };
        Ok(id)
    }

    /// Returns reservations made by `customer`, as produced by the
    /// reservation repository.
    ///
    /// An unsaved customer has no reservations.
    pub fn reservations_for(&self, customer: &Customer) -> RepoResult<Vec<Reservation>> {
        match customer.id {
            Some(id) => self.reservations.list_for_customer(id),
            None => Ok(Vec::new()),
        }
    }

    /// Returns how many reservations `customer` has made.
    pub fn num_reservations(&self, customer: &Customer) -> RepoResult<i64> {
        match customer.id {
            Some(id) => self.reservations.count_for_customer(id),
            None => Ok(0),
        }
    }
}
