//! `velora-core` — shared foundation for the velora backend.
//!
//! Pure domain primitives with no infrastructure concerns: the application
//! error taxonomy, the categorized store failure surface, and strongly-typed
//! record identifiers.

pub mod error;
pub mod id;
pub mod store;

pub use error::{AppError, AppResult, FieldError};
pub use id::{BookingId, CustomerId, ServiceId};
pub use store::{StoreError, StoreResult};
