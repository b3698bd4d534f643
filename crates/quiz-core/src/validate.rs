//! Field validation and identifier parsing.

use crate::errors::CoreError;

/// Require a text field to contain at least one non-whitespace character.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` when the value is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Parse a surrogate identifier supplied as text (e.g., a URL path segment).
///
/// # Errors
///
/// Returns `CoreError::Validation` for non-numeric or non-positive input.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, CoreError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(CoreError::validation(field, "must be a positive integer")),
        Err(_) => Err(CoreError::validation(
            field,
            format!("'{raw}' is not a numeric identifier"),
        )),
    }
}
