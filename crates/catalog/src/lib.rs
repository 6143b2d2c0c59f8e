//! Services catalog resource.
//!
//! Pass-through like bookings: shape checks on input, taxonomy errors out,
//! referential integrity left to the store.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Service, ServiceDraft, ServiceInput};
pub use repository::ServiceRepository;
pub use service::CatalogService;
