//! Database error types for quiz-db.

use quiz_core::errors::CoreError;
use thiserror::Error;

/// Errors from store and integrity operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A field value is missing or malformed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The addressed entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A unique constraint would be violated.
    #[error("{field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    /// A referenced parent entity does not exist.
    #[error("Referenced {entity} {id} does not exist")]
    Dependency { entity: &'static str, id: i64 },

    /// A SQL query failed or returned unexpected data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Caller-facing classification of a [`DatabaseError`].
///
/// Everything except `Store` is an expected condition the caller can act on.
/// `Store` details must not be shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Dependency,
    Store,
}

impl DatabaseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Dependency { .. } => ErrorKind::Dependency,
            Self::Query(_) | Self::Migration(_) | Self::LibSql(_) | Self::Other(_) => {
                ErrorKind::Store
            }
        }
    }

    /// Name of the offending field, when the error is about one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field.as_str()),
            Self::Conflict { field, .. } => Some(*field),
            Self::Dependency { entity, .. } => Some(match *entity {
                "category" => "categoryId",
                other => other,
            }),
            _ => None,
        }
    }

    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
        }
    }
}
