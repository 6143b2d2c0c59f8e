//! Uniform error envelope rendering.
//!
//! Every failure leaves the API as
//! `{"error": {"message", "code", "status", "details"?}}`; the taxonomy kind
//! alone decides the transport status. No business interpretation happens
//! here.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use velora_core::AppError;

pub fn respond(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut body = json!({
        "message": err.to_string(),
        "code": err.code(),
        "status": err.status(),
    });
    let details = err.details();
    if !details.is_empty() {
        body["details"] = json!(details);
    }

    (status, Json(json!({ "error": body }))).into_response()
}

/// A body axum could not read or parse is a validation failure, never a 500.
pub fn bad_json(rejection: &JsonRejection) -> Response {
    respond(&AppError::validation(format!(
        "request body is not valid JSON: {}",
        rejection.body_text()
    )))
}

/// Fallback for routes outside the table.
pub async fn unknown_route() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "message": "route not found",
                "code": "NOT_FOUND",
                "status": 404,
            }
        })),
    )
        .into_response()
}
