//! # Client-side validation
//!
//! Synchronous checks run on form payloads before they are handed to a store.
//! A payload that fails here never produces a request.
//!
//! ```rust
//! use carestay_types::{validation, LoginRequest};
//!
//! let errors = validation::check(&LoginRequest::new("nobody", "")).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

/// Phone numbers: optional leading `+`, then digits with spaces, dashes, or parentheses.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9(][0-9 ()\-]{6,19}$").expect("Invalid regex"));

/// Person names: letters first, then letters, spaces, dots, apostrophes, or hyphens.
pub static PERSON_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}[\p{L} .'\-]*$").expect("Invalid regex"));

/// Field-level validation error, ready to render next to a form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name, or `__all__` for checks spanning several fields.
    pub field: String,
    /// Error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Flattens validator output into field errors, sorted by field then code.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{}'", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    details
}

/// Validates a payload, returning its field errors on failure.
pub fn check<T: Validate>(payload: &T) -> Result<(), Vec<FieldError>> {
    payload.validate().map_err(|e| field_errors(&e))
}
