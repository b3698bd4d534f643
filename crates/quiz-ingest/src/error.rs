use std::path::PathBuf;

use quiz_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document '{name}' not found")]
    Missing { name: String },

    #[error("Invalid JSON in '{name}': {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A document name that would escape the source root.
    #[error("Invalid document name '{0}'")]
    InvalidPath(String),

    #[error("Malformed manifest: {0}")]
    Manifest(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
