//! Infrastructure layer: Postgres and in-memory repository implementations.
//!
//! Both backends present identical semantics through the repository
//! contracts, including the unique and foreign key failure categories the
//! services re-classify. The in-memory stores back the default run mode and
//! the test suite; Postgres backs `USE_PERSISTENT_STORES=true`.

pub mod db;
pub mod memory;
pub mod postgres;


pub use db::connect;
pub use memory::{MemoryBookingStore, MemoryCustomerStore, MemoryDatabase, MemoryServiceStore};
pub use postgres::{PostgresBookingStore, PostgresCustomerStore, PostgresServiceStore};
