//! Customer lifecycle and validation engine.
//!
//! This crate owns the only non-trivial business logic in the backend:
//! - `validate`: field rules for create/update/decision inputs, collecting
//!   every violation rather than stopping at the first
//! - `model`: the customer record, its approval states, and the
//!   merge-on-update patch
//! - `repository`: the store contract the engine consumes
//! - `service`: orchestration of validation, password hashing, state
//!   transitions, and store outcome re-classification

pub mod model;
pub mod repository;
pub mod service;
pub mod validate;

pub use model::{Customer, CustomerPatch, CustomerRole, CustomerStatus, Decision, NewCustomer};
pub use repository::CustomerRepository;
pub use service::CustomerService;
pub use validate::{CreateCustomerInput, DecisionInput, UpdateCustomerInput};
