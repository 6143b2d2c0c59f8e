//! Catalog entries and their shape checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use velora_core::{AppError, FieldError, ServiceId};

/// A bookable service as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw catalog payload as deserialized from a request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

/// Checked catalog fields, used for both insert and full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Shape-check a catalog payload, collecting every field failure in order.
pub fn validate_input(input: &ServiceInput) -> Result<ServiceDraft, AppError> {
    let mut errors = Vec::new();

    let name = check_text("name", input.name.as_deref(), &mut errors);
    let description = check_text("description", input.description.as_deref(), &mut errors);

    let duration = match input.duration {
        Some(minutes) if minutes > 0 => Some(minutes),
        _ => {
            errors.push(FieldError::new(
                "duration",
                "duration must be a positive number of minutes",
            ));
            None
        }
    };

    let price = match input.price {
        Some(price) if price >= 0.0 => Some(price),
        _ => {
            errors.push(FieldError::new("price", "price must be zero or greater"));
            None
        }
    };

    if !errors.is_empty() {
        return Err(AppError::validation_fields(errors));
    }

    Ok(ServiceDraft {
        name: name.unwrap_or_default(),
        description: description.unwrap_or_default(),
        duration: duration.unwrap_or_default(),
        price: price.unwrap_or_default(),
        image_url: input.image_url.clone(),
    })
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

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ServiceInput {
        ServiceInput {
            name: Some("Deep tissue massage".to_string()),
            description: Some("60 minute full body massage".to_string()),
            duration: Some(60),
            price: Some(45.0),
            image_url: None,
        }
    }

    #[test]
    fn valid_input_produces_a_draft() {
        let draft = validate_input(&valid_input()).expect("input should validate");
        assert_eq!(draft.duration, 60);
        assert_eq!(draft.price, 45.0);
        assert!(draft.image_url.is_none());
    }

    #[test]
    fn free_services_are_allowed() {
        let input = ServiceInput {
            price: Some(0.0),
            ..valid_input()
        };
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn zero_or_negative_duration_is_rejected() {
        for minutes in [0, -15] {
            let input = ServiceInput {
                duration: Some(minutes),
                ..valid_input()
            };
            let Err(err) = validate_input(&input) else {
                panic!("{minutes} minutes should be rejected");
            };
            assert_eq!(err.details()[0].field, "duration");
        }
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let Err(err) = validate_input(&ServiceInput::default()) else {
            panic!("empty input should not validate");
        };
        let fields: Vec<_> = err.details().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "description", "duration", "price"]);
    }
}
