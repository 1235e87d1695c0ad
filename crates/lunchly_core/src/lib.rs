//! Data-access core for the Lunchly restaurant reservation app.
//! Owns the customer/reservation schema and every SQL statement against it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use db::{close_db, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerId, CustomerRanking};
pub use model::reservation::{Reservation, ReservationId};
pub use model::ValidationError;
pub use repo::customer_repo::{
    CustomerRepository, NameFilter, RecordKind, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use repo::reservation_repo::{ReservationRepository, SqliteReservationRepository};
pub use service::customer_service::{CustomerService, BEST_CUSTOMERS_LIMIT};
pub use service::reservation_service::ReservationService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
