//! Booking records and input shape checks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use velora_core::{AppError, BookingId, CustomerId, FieldError, ServiceId};

/// Scheduling state of a booking. Carried as opaque data; no transition
/// rules apply at this layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
    Pending,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking as stored. Times stay wire strings; only the date is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub client_id: CustomerId,
    pub client_name: String,
    pub service_id: ServiceId,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub booking_status: BookingStatus,
    pub treatment_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw booking payload as deserialized from a request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingInput {
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub service_id: Option<i64>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub booking_status: Option<String>,
    pub treatment_id: Option<Uuid>,
}

/// Checked booking fields, used for both insert and full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub client_id: CustomerId,
    pub client_name: String,
    pub service_id: ServiceId,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub booking_status: BookingStatus,
    pub treatment_id: Uuid,
}

/// Shape-check a booking payload, collecting every field failure in order.
///
/// A missing `booking_status` defaults to pending; a missing `treatment_id`
/// gets a fresh v7 UUID.
pub fn validate_input(input: &BookingInput) -> Result<BookingDraft, AppError> {
    let mut errors = Vec::new();

    let client_id = check_id("client_id", input.client_id, &mut errors);
    let client_name = check_text("client_name", input.client_name.as_deref(), &mut errors);
    let service_id = check_id("service_id", input.service_id, &mut errors);
    let booking_date = check_date(input.booking_date.as_deref(), &mut errors);
    let start_time = check_text("start_time", input.start_time.as_deref(), &mut errors);
    let end_time = check_text("end_time", input.end_time.as_deref(), &mut errors);
    let booking_status = check_status(input.booking_status.as_deref(), &mut errors);

    if !errors.is_empty() {
        return Err(AppError::validation_fields(errors));
    }

    // Unwraps are shielded by the empty error list above.
    Ok(BookingDraft {
        client_id: CustomerId::from_i64(client_id.unwrap_or_default()),
        client_name: client_name.unwrap_or_default(),
        service_id: ServiceId::from_i64(service_id.unwrap_or_default()),
        booking_date: booking_date.unwrap_or_default(),
        start_time: start_time.unwrap_or_default(),
        end_time: end_time.unwrap_or_default(),
        booking_status,
        treatment_id: input.treatment_id.unwrap_or_else(Uuid::now_v7),
    })
}

/// Parse the `date` query parameter for the daily schedule listing.
pub fn parse_schedule_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let date = raw
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            AppError::validation_fields(vec![FieldError::new(
                "date",
                "date must be a valid date in YYYY-MM-DD format",
            )])
        })?;
    Ok(date)
}

fn check_id(field: &'static str, value: Option<i64>, errors: &mut Vec<FieldError>) -> Option<i64> {
    match value {
        Some(id) if id >= 0 => Some(id),
        Some(_) => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be a non-negative integer"),
            ));
            None
        }
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

fn check_text(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text.to_string()),
        _ => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

fn check_date(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let parsed = value.and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
    if parsed.is_none() {
        errors.push(FieldError::new(
            "booking_date",
            "booking_date must be a valid date in YYYY-MM-DD format",
        ));
    }
    parsed
}

fn check_status(value: Option<&str>, errors: &mut Vec<FieldError>) -> BookingStatus {
    match value {
        None => BookingStatus::Pending,
        Some(raw) => BookingStatus::parse(raw).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "booking_status",
                "booking_status must be one of: confirmed, cancelled, completed, pending",
            ));
            BookingStatus::Pending
        }),
    }
}
