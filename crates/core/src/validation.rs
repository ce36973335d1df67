//! Request validation.
//!
//! Every request shape declares its numeric fields explicitly through
//! [`Validate`]; each field is checked with the same predicate and the first
//! failure is returned, naming the field by its dotted path in the body.
//! Unit-label fields are never checked.

use crate::error::CoreError;

/// A request body that can check its own fields.
pub trait Validate {
    /// Fail on the first invalid field.
    fn validate(&self) -> Result<(), CoreError>;
}

/// Require a finite number strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(CoreError::InvalidField {
        field: field.to_string(),
        reason: format!("must be a positive number, got {value}"),
    })
}

/// Require a count of at least one.
pub fn require_positive_count(field: &str, value: u32) -> Result<(), CoreError> {
    if value > 0 {
        return Ok(());
    }
    Err(CoreError::InvalidField {
        field: field.to_string(),
        reason: "must be a positive number, got 0".to_string(),
    })
}

/// Require a finite number greater than or equal to zero.
pub fn require_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(CoreError::InvalidField {
        field: field.to_string(),
        reason: format!("must be zero or a positive number, got {value}"),
    })
}

/// Require a string with at least one non-whitespace character.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    Err(CoreError::InvalidField {
        field: field.to_string(),
        reason: "is required".to_string(),
    })
}

/// Require an optional positive value to be present.
pub fn require_present(field: &str, value: Option<f64>, context: &str) -> Result<f64, CoreError> {
    let value = value.ok_or_else(|| CoreError::InvalidField {
        field: field.to_string(),
        reason: format!("is required for {context}"),
    })?;
    require_positive(field, value)?;
    Ok(value)
}

/// Join a parent path and a child key into a dotted field path.
pub fn field_path(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}
