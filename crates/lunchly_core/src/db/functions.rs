//! Application-defined SQL functions installed on every connection.
//!
//! # Invariants
//! - `fold_case(x)` folds with the same Unicode rules as
//!   `repo::customer_repo::like_pattern`, so both sides of a name search
//!   compare in one case space. SQLite's own `lower()` folds ASCII only.
//! - `fold_case(NULL)` is `NULL`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name of the Unicode-aware lowercase function visible to SQL.
pub const FOLD_CASE_FN: &str = "fold_case";

pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| fold_case(&text)))
        },
    )
}

/// Unicode lowercase used for case-insensitive comparisons.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
