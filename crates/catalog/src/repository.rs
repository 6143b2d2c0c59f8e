//! Store contract for the services catalog.

use async_trait::async_trait;

use velora_core::{ServiceId, StoreResult};

use crate::model::{Service, ServiceDraft};

/// Persistence operations for catalog entries.
///
/// `delete` fails with the foreign key category while bookings still
/// reference the entry.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert(&self, draft: ServiceDraft) -> StoreResult<Service>;

    async fn find_by_id(&self, id: ServiceId) -> StoreResult<Option<Service>>;

    /// All catalog entries, ascending by id.
    async fn find_all(&self) -> StoreResult<Vec<Service>>;

    /// Full replace of the mutable fields. `None` when the row is gone.
    async fn update(&self, id: ServiceId, draft: ServiceDraft) -> StoreResult<Option<Service>>;

    /// `true` when a row was removed.
    async fn delete(&self, id: ServiceId) -> StoreResult<bool>;
}
