use std::str::FromStr;

use axum::response::Response;

use velora_core::AppError;

use crate::app::errors;

/// Parse a digits-only path parameter into a typed id, or render the
/// validation envelope immediately.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = AppError>,
{
    raw.parse::<T>().map_err(|err| errors::respond(&err))
}
