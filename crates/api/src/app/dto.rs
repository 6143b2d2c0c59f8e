//! Success envelopes and response shapes.
//!
//! Payloads ride inside `{"data": ..}`; the customer serializer already
//! excludes the password hash, so nothing here needs to redact.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use velora_core::CustomerId;
use velora_customers::CustomerStatus;

pub fn data<T: Serialize>(value: &T) -> Response {
    (StatusCode::OK, Json(json!({ "data": value }))).into_response()
}

pub fn created<T: Serialize>(value: &T) -> Response {
    (StatusCode::CREATED, Json(json!({ "data": value }))).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Body returned by the approval-decision endpoint.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub id: CustomerId,
    pub email: String,
    pub status: CustomerStatus,
    pub message: &'static str,
}

impl DecisionResponse {
    pub fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
