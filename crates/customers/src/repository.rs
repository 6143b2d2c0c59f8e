//! Store contract consumed by the lifecycle service.

use async_trait::async_trait;

use velora_core::{CustomerId, StoreResult};

use crate::model::{Customer, CustomerPatch, Decision, NewCustomer};

/// Persistence operations for customer records.
///
/// Reads are idempotent; every write is a single logical unit. Implementations
/// report constraint violations through the `StoreError` categories — a
/// duplicate email on `insert` is a unique violation, a delete blocked by
/// dependent bookings is a foreign key violation — and the service layer
/// re-classifies those into the application taxonomy. The store's rejection at
/// write time is authoritative; callers must not assume an earlier read is
/// still valid when a write executes.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// All customers, ascending by id.
    async fn find_all(&self) -> StoreResult<Vec<Customer>>;

    /// Customers still awaiting an approval decision, ascending by id.
    async fn find_pending(&self) -> StoreResult<Vec<Customer>>;

    async fn insert(&self, data: NewCustomer) -> StoreResult<Customer>;

    /// Unconditional write of the decided status. `None` when the row is gone.
    async fn update_status(
        &self,
        id: CustomerId,
        decision: Decision,
    ) -> StoreResult<Option<Customer>>;

    /// Overlay the supplied mutable fields onto the current row and write the
    /// merged record in one statement. `None` when the row is gone.
    async fn merge_update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>>;

    /// `true` when a row was removed. A delete blocked by dependent bookings
    /// fails with the foreign key category instead.
    async fn delete(&self, id: CustomerId) -> StoreResult<bool>;

    /// Diagnostic booking count; never a substitute for the referential
    /// rejection `delete` itself reports.
    async fn count_bookings_for(&self, id: CustomerId) -> StoreResult<i64>;
}
