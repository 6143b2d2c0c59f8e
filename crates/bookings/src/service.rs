//! Booking operations exposed to the transport layer.

use std::sync::Arc;

use velora_core::{AppError, AppResult, BookingId, StoreError};

use crate::model::{self, Booking, BookingInput};
use crate::repository::BookingRepository;

const RESOURCE: &str = "booking";

/// Thin pass-through over the booking store: shape checks in, taxonomy
/// errors out.
#[derive(Clone)]
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: &BookingInput) -> AppResult<Booking> {
        let draft = model::validate_input(input)?;

        let booking = self.repository.insert(draft).await.map_err(map_write)?;
        tracing::info!(booking_id = %booking.id, "booking created");
        Ok(booking)
    }

    pub async fn get(&self, id: BookingId) -> AppResult<Booking> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        self.repository.find_all().await.map_err(internal)
    }

    /// Daily schedule, driven by the `date` query parameter.
    pub async fn list_for_date(&self, date: Option<&str>) -> AppResult<Vec<Booking>> {
        let date = model::parse_schedule_date(date)?;
        self.repository.find_for_date(date).await.map_err(internal)
    }

    pub async fn update(&self, id: BookingId, input: &BookingInput) -> AppResult<Booking> {
        let draft = model::validate_input(input)?;

        self.repository
            .update(id, draft)
            .await
            .map_err(map_write)?
            .ok_or(AppError::not_found(RESOURCE))
    }

    pub async fn delete(&self, id: BookingId) -> AppResult<()> {
        if self.repository.delete(id).await.map_err(internal)? {
            tracing::info!(booking_id = %id, "booking deleted");
            Ok(())
        } else {
            Err(AppError::not_found(RESOURCE))
        }
    }
}

/// Writes referencing a missing customer or service come back as foreign
/// key violations; anything else is internal.
fn map_write(err: StoreError) -> AppError {
    match err {
        StoreError::ForeignKeyViolation { .. } => {
            AppError::conflict("booking references an unknown customer or service")
        }
        other => internal(other),
    }
}

fn internal(err: StoreError) -> AppError {
    AppError::internal(err.to_string())
}
