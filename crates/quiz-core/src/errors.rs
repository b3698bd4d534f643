//! Cross-cutting error types.
//!
//! Storage errors (`DatabaseError`) live in `quiz-db`; this module only covers
//! failures that core helpers can raise on their own.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A field value failed validation.
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
