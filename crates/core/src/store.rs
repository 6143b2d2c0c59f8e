//! Categorized store failure surface.
//!
//! Repositories translate backend-specific failures into these categories so
//! services can re-classify them into the application taxonomy without ever
//! inspecting backend details. The two write categories mirror what a
//! relational backend reports for constraint violations.

use thiserror::Error;

/// Result type used by repository implementations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A failure reported by a backing store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated ({})", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    /// A foreign key constraint rejected the write.
    #[error("foreign key constraint violated ({})", constraint.as_deref().unwrap_or("unknown"))]
    ForeignKeyViolation { constraint: Option<String> },

    /// Any other backend failure (connectivity, malformed rows, ...).
    #[error("store failure: {0}")]
    Other(String),
}

impl StoreError {
    pub fn unique_violation(constraint: Option<String>) -> Self {
        Self::UniqueViolation { constraint }
    }

    pub fn foreign_key_violation(constraint: Option<String>) -> Self {
        Self::ForeignKeyViolation { constraint }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation { .. })
    }
}
