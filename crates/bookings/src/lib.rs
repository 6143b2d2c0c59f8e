//! Bookings resource.
//!
//! Pure data pass-through: inputs get shape-level checks only, and the store
//! answers for referential integrity. The customer engine owns every
//! lifecycle rule; nothing here ever inspects a customer's status.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Booking, BookingDraft, BookingInput, BookingStatus};
pub use repository::BookingRepository;
pub use service::BookingService;
