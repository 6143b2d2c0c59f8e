//! Store contract for the bookings resource.

use async_trait::async_trait;
use chrono::NaiveDate;

use velora_core::{BookingId, StoreResult};

use crate::model::{Booking, BookingDraft};

/// Persistence operations for bookings.
///
/// `insert` and `update` fail with the foreign key category when the draft
/// references an unknown customer or service; the service layer turns that
/// into a conflict.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, draft: BookingDraft) -> StoreResult<Booking>;

    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>>;

    /// All bookings, ascending by id.
    async fn find_all(&self) -> StoreResult<Vec<Booking>>;

    /// Bookings scheduled on one calendar day, ascending by id.
    async fn find_for_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>>;

    /// Full replace of the mutable fields. `None` when the row is gone.
    async fn update(&self, id: BookingId, draft: BookingDraft) -> StoreResult<Option<Booking>>;

    /// `true` when a row was removed.
    async fn delete(&self, id: BookingId) -> StoreResult<bool>;
}
