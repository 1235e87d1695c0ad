//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, name search and ranking APIs over `customers`.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Customer::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Listing and search results are ordered by `last_name, first_name, id`.
//! - Name search needs the `fold_case` SQL function, so the connection must
//!   come from `db::open_db*`.

use crate::db::functions::fold_case;
use crate::db::DbError;
use crate::model::customer::{Customer, CustomerId, CustomerRanking};
use crate::model::ValidationError;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone,
    notes
FROM customers";

const CUSTOMER_ORDER_SQL: &str = "ORDER BY last_name ASC, first_name ASC, id ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record a semantic repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Customer,
    Reservation,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Reservation => write!(f, "reservation"),
        }
    }
}

/// Generic repository error for customer/reservation persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { kind: RecordKind, id: i64 },
    /// Update requested for a record that was never inserted.
    Unsaved(RecordKind),
    InvalidData(String),
}

impl RepoError {
    /// HTTP-style status code a web layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::Unsaved(_) => 400,
            Self::Db(_) | Self::InvalidData(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "No such {kind}: {id}"),
            Self::Unsaved(kind) => write!(f, "cannot update unsaved {kind}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Unsaved(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Case-insensitive name search criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// First name contains `first` AND last name contains `last`.
    FirstAndLast { first: String, last: String },
    /// First OR last name contains the term.
    Either(String),
    /// No usable term; matches every customer.
    Any,
}

impl NameFilter {
    /// Builds a filter from raw user terms.
    ///
    /// Terms are trimmed; blank terms count as absent. A lone term in either
    /// position searches both name columns.
    pub fn from_terms(term1: &str, term2: Option<&str>) -> Self {
        let first = non_blank(term1);
        let last = term2.and_then(non_blank);
        match (first, last) {
            (Some(first), Some(last)) => Self::FirstAndLast { first, last },
            (Some(term), None) | (None, Some(term)) => Self::Either(term),
            (None, None) => Self::Any,
        }
    }
}

/// Repository interface for customer operations.
pub trait CustomerRepository {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    fn update_customer(&self, customer: &Customer) -> RepoResult<()>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    fn filter_by_name(&self, filter: &NameFilter) -> RepoResult<Vec<Customer>>;
    /// Customers with at least one reservation, most reservations first.
    fn best_customers(&self, limit: u32) -> RepoResult<Vec<CustomerRanking>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        customer.validate()?;

        self.conn.execute(
            "INSERT INTO customers (first_name, last_name, phone, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.phone.as_deref(),
                customer.notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        let id = customer.id.ok_or(RepoError::Unsaved(RecordKind::Customer))?;
        customer.validate()?;

        let changed = self.conn.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.phone.as_deref(),
                customer.notes.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Customer,
                id,
            });
        }

        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} {CUSTOMER_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn filter_by_name(&self, filter: &NameFilter) -> RepoResult<Vec<Customer>> {
        let (sql, bind_values) = match filter {
            NameFilter::FirstAndLast { first, last } => (
                format!(
                    "{CUSTOMER_SELECT_SQL}
                     WHERE fold_case(first_name) LIKE ?1 ESCAPE '\\'
                       AND fold_case(last_name) LIKE ?2 ESCAPE '\\'
                     {CUSTOMER_ORDER_SQL};"
                ),
                vec![like_pattern(first), like_pattern(last)],
            ),
            NameFilter::Either(term) => (
                format!(
                    "{CUSTOMER_SELECT_SQL}
                     WHERE fold_case(first_name) LIKE ?1 ESCAPE '\\'
                        OR fold_case(last_name) LIKE ?1 ESCAPE '\\'
                     {CUSTOMER_ORDER_SQL};"
                ),
                vec![like_pattern(term)],
            ),
            NameFilter::Any => return self.list_customers(),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind_values))?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn best_customers(&self, limit: u32) -> RepoResult<Vec<CustomerRanking>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id AS id,
                c.first_name AS first_name,
                c.last_name AS last_name,
                c.phone AS phone,
                c.notes AS notes,
                COUNT(r.id) AS reservation_count
             FROM customers AS c
             INNER JOIN reservations AS r ON r.customer_id = c.id
             GROUP BY c.id
             ORDER BY reservation_count DESC, c.last_name ASC, c.first_name ASC, c.id ASC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query([i64::from(limit)])?;
        let mut rankings = Vec::new();

        while let Some(row) = rows.next()? {
            rankings.push(CustomerRanking {
                customer: parse_customer_row(row)?,
                reservation_count: row.get("reservation_count")?,
            });
        }

        Ok(rankings)
    }
}

/// Case-folds `term` like the SQL `fold_case` function, escapes LIKE
/// metacharacters and wraps it in `%`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in fold_case(term).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn non_blank(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id: CustomerId = row.get("id")?;
    let customer = Customer {
        id: Some(id),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
        notes: row.get("notes")?,
    };
    customer
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("customers.id={id}: {err}")))?;
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::{like_pattern, NameFilter, RecordKind, RepoError};

    #[test]
    fn like_pattern_lowercases_and_escapes_metacharacters() {
        assert_eq!(like_pattern("Ann"), "%ann%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn name_filter_treats_blank_terms_as_absent() {
        assert_eq!(
            NameFilter::from_terms(" ann ", Some("Smith")),
            NameFilter::FirstAndLast {
                first: "ann".to_string(),
                last: "Smith".to_string(),
            }
        );
        assert_eq!(
            NameFilter::from_terms("ann", Some("  ")),
            NameFilter::Either("ann".to_string())
        );
        assert_eq!(
            NameFilter::from_terms("", Some("smith")),
            NameFilter::Either("smith".to_string())
        );
        assert_eq!(NameFilter::from_terms("   ", None), NameFilter::Any);
    }

    #[test]
    fn not_found_maps_to_404_with_readable_message() {
        let err = RepoError::NotFound {
            kind: RecordKind::Customer,
            id: 42,
        };
        assert_eq!(err.status_code(), 404);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No such customer: 42");
    }
}
