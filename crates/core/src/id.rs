//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are store-assigned integers. Parsing from a route parameter
//! accepts decimal digits only, so a malformed id surfaces as a field-level
//! validation failure rather than a lookup miss.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FieldError};

/// Identifier of a customer record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

/// Identifier of a booking record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

/// Identifier of a service offered in the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(i64);

fn invalid_id_param(param: &str) -> AppError {
    AppError::validation_fields(vec![FieldError::new(
        param,
        format!("{param} must be a non-negative integer"),
    )])
}

macro_rules! impl_i64_newtype {
    ($t:ty) => {
        impl $t {
            /// Wrap a store-assigned identifier.
            pub fn from_i64(value: i64) -> Self {
                Self(value)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = AppError;

            /// Accepts a string of decimal digits only (so the value is
            /// always >= 0); anything else fails validation on `id`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid_id_param("id"));
                }
                s.parse::<i64>().map(Self).map_err(|_| invalid_id_param("id"))
            }
        }
    };
}

impl_i64_newtype!(CustomerId);
impl_i64_newtype!(BookingId);
impl_i64_newtype!(ServiceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digit_strings() {
        let id: CustomerId = "42".parse().expect("digits should parse");
        assert_eq!(id.as_i64(), 42);

        let padded: BookingId = "007".parse().expect("leading zeros are digits");
        assert_eq!(padded.as_i64(), 7);
    }

    #[test]
    fn rejects_non_digit_strings() {
        for bad in ["", "abc", "12a", "-5", "+7", "1.5", " 3"] {
            let parsed = bad.parse::<CustomerId>();
            let Err(err) = parsed else {
                panic!("{bad:?} should not parse");
            };
            assert_eq!(err.code(), "VALIDATION_ERROR");
            assert_eq!(err.details()[0].field, "id");
        }
    }

    #[test]
    fn rejects_values_past_i64_range() {
        assert!("99999999999999999999".parse::<ServiceId>().is_err());
    }

    #[test]
    fn displays_as_plain_integer() {
        assert_eq!(ServiceId::from_i64(9).to_string(), "9");
    }
}
