//! Application error taxonomy.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the service layer.
pub type AppResult<T> = Result<T, AppError>;

/// A single field-level validation failure.
///
/// Collected in input declaration order, so callers can report every
/// offending field rather than just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level failure.
///
/// Closed set: every failure leaving a service resolves to exactly one of
/// these kinds. Each kind carries a stable machine code and a numeric status
/// class so the transport boundary can render it without any business
/// interpretation of its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A lookup by id matched no record.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Input failed schema checks, or a state precondition does not hold.
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    /// A store constraint rejected the write (duplicate email, delete
    /// blocked by dependent rows).
    #[error("{0}")]
    Conflict(String),

    /// Reserved for future authentication integration.
    #[error("unauthorized")]
    Unauthorized,

    /// Any failure outside the known kinds.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn validation_fields(details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: "validation failed".to_string(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine code for client-side branching.
    pub fn code(&self) -> String {
        match self {
            Self::NotFound { resource } => format!("{}_NOT_FOUND", resource.to_uppercase()),
            Self::Validation { .. } => "VALIDATION_ERROR".to_string(),
            Self::Conflict(_) => "CONFLICT".to_string(),
            Self::Unauthorized => "UNAUTHORIZED".to_string(),
            Self::Internal(_) => "SERVER_ERROR".to_string(),
        }
    }

    /// Numeric status class rendered by the transport boundary.
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized => 401,
            Self::Internal(_) => 500,
        }
    }

    /// Field-level details; empty for every kind except validation failures.
    pub fn details(&self) -> &[FieldError] {
        match self {
            Self::Validation { details, .. } => details,
            _ => &[],
        }
    }
}
