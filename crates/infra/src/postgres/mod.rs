//! Postgres-backed repository implementations.
//!
//! Every statement is parameterized. Database failures are mapped onto the
//! `StoreError` categories here, once, so the domain crates never see a
//! SQLSTATE:
//!
//! | SQLSTATE | Category |
//! |---|---|
//! | `23505` (unique violation) | `StoreError::UniqueViolation` |
//! | `23503` (foreign key violation) | `StoreError::ForeignKeyViolation` |
//! | anything else | `StoreError::Other` |

use velora_core::StoreError;

mod bookings;
mod customers;
mod services;

pub use bookings::PostgresBookingStore;
pub use customers::PostgresCustomerStore;
pub use services::PostgresServiceStore;

/// Map a sqlx failure onto the categorized store error.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().map(str::to_string);
            match db_err.code().as_deref() {
                Some("23505") => StoreError::unique_violation(constraint),
                Some("23503") => StoreError::foreign_key_violation(constraint),
                _ => StoreError::other(format!(
                    "database error in {operation}: {}",
                    db_err.message()
                )),
            }
        }
        other => StoreError::other(format!("sqlx error in {operation}: {other}")),
    }
}
