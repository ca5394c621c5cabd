//! # Error Types
//!
//! Domain error type for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── DataValidationError - missing identity, bad input data            │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError             - database failures, wraps the above          │
//! │                                                                         │
//! │  Flow: DataValidationError → DbError::Validation → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Raised when an operation gets data it cannot accept.
///
/// The repository raises [`DataValidationError::MissingId`] synchronously,
/// before touching the database, when a product without a persisted
/// identity is updated or deleted. The remaining variants come from the
/// structured-data codec and price coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    /// Update or delete called on a product that was never created.
    #[error("Called with empty ID field")]
    MissingId,

    /// A required key is absent from structured input.
    #[error("Invalid product: missing {field}")]
    MissingField { field: String },

    /// A key holds a value of the wrong JSON type.
    ///
    /// ## When This Occurs
    /// - `available` is a string or number instead of a boolean
    /// - `name` is not a string
    #[error("Invalid type for {expected} [{field}]")]
    InvalidType { field: String, expected: String },

    /// Category name is not one of the known variants.
    #[error("Invalid attribute: unknown category '{0}'")]
    InvalidCategory(String),

    /// Value cannot be coerced to a two-decimal price.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Structured input is not an object at all.
    #[error("Invalid product: body of request contained bad or no data")]
    InvalidBody,
}

impl DataValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        DataValidationError::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        DataValidationError::InvalidType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn invalid_price(value: impl Into<String>, reason: impl Into<String>) -> Self {
        DataValidationError::InvalidPrice {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, DataValidationError>;
