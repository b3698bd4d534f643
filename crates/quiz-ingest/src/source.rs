//! Where manifest and category documents are read from.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::error::IngestError;

/// Resolves a document name (as written in the manifest) to its text.
pub trait DocumentSource {
    /// # Errors
    ///
    /// Returns `IngestError` if the document is absent, unreadable, or the
    /// name is not acceptable to this source.
    fn read(&self, name: &str) -> Result<String, IngestError>;
}

/// Documents stored as files under one root directory.
///
/// Names must be relative and stay inside the root.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, IngestError> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(IngestError::InvalidPath(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentSource for DirSource {
    fn read(&self, name: &str) -> Result<String, IngestError> {
        let path = self.resolve(name)?;
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                IngestError::Missing {
                    name: name.to_string(),
                }
            } else {
                IngestError::Io { path, source }
            }
        })
    }
}

/// In-memory documents, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(name.into(), text.into());
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, name: &str) -> Result<String, IngestError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| IngestError::Missing {
                name: name.to_string(),
            })
    }
}
