//! # Validation Module
//!
//! Typed field readers for structured (JSON) product input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Key present?          → MissingField                              │
//! │  └── Right JSON type?      → InvalidType                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain coercion (types.rs / price.rs)                        │
//! │  ├── Category name lookup  → InvalidCategory                           │
//! │  └── Price coercion        → InvalidPrice                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK on category                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only types are checked here. Content rules (lengths, ranges) are not part
//! of the catalog's contract.

use serde_json::{Map, Value};

use crate::error::{DataValidationError, ValidationResult};

/// Returns the value under `field`, failing if the key is absent.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::read_value;
/// use serde_json::json;
///
/// let data = json!({ "price": "1.00" });
/// let object = data.as_object().unwrap();
///
/// assert!(read_value(object, "price").is_ok());
/// assert!(read_value(object, "name").is_err());
/// ```
pub fn read_value<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| DataValidationError::missing(field))
}

/// Reads a required string field.
pub fn read_str<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    read_value(object, field)?
        .as_str()
        .ok_or_else(|| DataValidationError::invalid_type(field, "string"))
}

/// Reads an optional string field; absent and `null` both yield `None`.
pub fn read_optional_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> ValidationResult<Option<&'a str>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(DataValidationError::invalid_type(field, "string")),
    }
}

/// Reads a required boolean field. Strings like `"true"` are rejected.
pub fn read_bool(object: &Map<String, Value>, field: &str) -> ValidationResult<bool> {
    read_value(object, field)?
        .as_bool()
        .ok_or_else(|| DataValidationError::invalid_type(field, "boolean"))
}

// =============================================================================
// Unit Tests
// =============================================================================
