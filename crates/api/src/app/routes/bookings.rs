use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use velora_bookings::model::BookingInput;
use velora_core::BookingId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/professional/bookings", get(daily_schedule))
        .route("/", get(list_all).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    date: Option<String>,
}

/// GET /api/bookings/professional/bookings?date=YYYY-MM-DD
async fn daily_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ScheduleQuery>,
) -> Response {
    match services.bookings.list_for_date(query.date.as_deref()).await {
        Ok(bookings) => dto::data(&bookings),
        Err(err) => errors::respond(&err),
    }
}

async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.bookings.list_all().await {
        Ok(bookings) => dto::data(&bookings),
        Err(err) => errors::respond(&err),
    }
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<BookingId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.bookings.get(id).await {
        Ok(booking) => dto::data(&booking),
        Err(err) => errors::respond(&err),
    }
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<BookingInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.bookings.create(&input).await {
        Ok(booking) => dto::created(&booking),
        Err(err) => errors::respond(&err),
    }
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<BookingInput>, JsonRejection>,
) -> Response {
    let id = match common::parse_id::<BookingId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.bookings.update(id, &input).await {
        Ok(booking) => dto::data(&booking),
        Err(err) => errors::respond(&err),
    }
}

async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<BookingId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.bookings.delete(id).await {
        Ok(()) => dto::no_content(),
        Err(err) => errors::respond(&err),
    }
}
