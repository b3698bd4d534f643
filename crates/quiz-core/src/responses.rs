//! Report types returned by long-running operations.

use serde::{Deserialize, Serialize};

/// A single item skipped (or partially applied) during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestWarning {
    /// Where in the source the problem was found, e.g. `manifest[2]` or
    /// `science.json: questions[1].answers[0]`.
    pub location: String,
    pub message: String,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReport {
    pub categories_created: u32,
    pub categories_updated: u32,
    /// Categories whose stored title already matched the manifest.
    pub categories_unchanged: u32,
    pub questions_created: u32,
    /// Questions that already existed with identical text in the same category.
    pub questions_skipped: u32,
    pub answers_created: u32,
    pub warnings: Vec<IngestWarning>,
}

impl IngestReport {
    pub fn warn(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(IngestWarning {
            location: location.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
