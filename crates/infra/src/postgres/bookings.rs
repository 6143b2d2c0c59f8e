//! Postgres booking store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use velora_bookings::model::{Booking, BookingDraft, BookingStatus};
use velora_bookings::repository::BookingRepository;
use velora_core::{BookingId, CustomerId, ServiceId, StoreError, StoreResult};

use super::map_sqlx_error;

const COLUMNS: &str = "id, client_id, client_name, service_id, booking_date, start_time, \
                       end_time, booking_status, treatment_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingStore {
    #[instrument(skip(self, draft), err)]
    async fn insert(&self, draft: BookingDraft) -> StoreResult<Booking> {
        let row = sqlx::query(&format!(
            "INSERT INTO bookings (client_id, client_name, service_id, booking_date, \
                                   start_time, end_time, booking_status, treatment_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(draft.client_id.as_i64())
        .bind(&draft.client_name)
        .bind(draft.service_id.as_i64())
        .bind(draft.booking_date)
        .bind(&draft.start_time)
        .bind(&draft.end_time)
        .bind(draft.booking_status.as_str())
        .bind(draft.treatment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        booking_from_row(row)
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM bookings WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(booking_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM bookings ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.into_iter().map(booking_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_for_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE booking_date = $1 ORDER BY id"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_for_date", e))?;

        rows.into_iter().map(booking_from_row).collect()
    }

    #[instrument(skip(self, draft), err)]
    async fn update(&self, id: BookingId, draft: BookingDraft) -> StoreResult<Option<Booking>> {
        let row = sqlx::query(&format!(
            "UPDATE bookings SET \
                client_id = $1, client_name = $2, service_id = $3, booking_date = $4, \
                start_time = $5, end_time = $6, booking_status = $7, treatment_id = $8, \
                updated_at = NOW() \
             WHERE id = $9 \
             RETURNING {COLUMNS}"
        ))
        .bind(draft.client_id.as_i64())
        .bind(&draft.client_name)
        .bind(draft.service_id.as_i64())
        .bind(draft.booking_date)
        .bind(&draft.start_time)
        .bind(&draft.end_time)
        .bind(draft.booking_status.as_str())
        .bind(draft.treatment_id)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.map(booking_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: BookingId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug)]
struct BookingRow {
    id: i64,
    client_id: i64,
    client_name: String,
    service_id: i64,
    booking_date: NaiveDate,
    start_time: String,
    end_time: String,
    booking_status: String,
    treatment_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for BookingRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(BookingRow {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            client_name: row.try_get("client_name")?,
            service_id: row.try_get("service_id")?,
            booking_date: row.try_get("booking_date")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            booking_status: row.try_get("booking_status")?,
            treatment_id: row.try_get("treatment_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn booking_from_row(row: PgRow) -> StoreResult<Booking> {
    let row = BookingRow::from_row(&row)
        .map_err(|e| StoreError::other(format!("failed to read booking row: {e}")))?;

    let booking_status = BookingStatus::parse(&row.booking_status).ok_or_else(|| {
        StoreError::other(format!("unknown booking status '{}'", row.booking_status))
    })?;

    Ok(Booking {
        id: BookingId::from_i64(row.id),
        client_id: CustomerId::from_i64(row.client_id),
        client_name: row.client_name,
        service_id: ServiceId::from_i64(row.service_id),
        booking_date: row.booking_date,
        start_time: row.start_time,
        end_time: row.end_time,
        booking_status,
        treatment_id: row.treatment_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
