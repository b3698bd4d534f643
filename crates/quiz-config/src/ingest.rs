//! Batch ingestion configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_manifest() -> String {
    "index.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Directory holding the manifest and the per-category documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Manifest file name, relative to `data_dir`.
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            manifest: default_manifest(),
        }
    }
}

impl IngestConfig {
    #[must_use]
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
