//! Manifest parsing.
//!
//! The manifest is a JSON array of `{title, file, slug?}` objects. The array
//! itself must be well formed; individual entries that are not are skipped
//! with a warning.

use quiz_core::responses::IngestReport;
use quiz_core::slug::slug_or_derive;
use serde_json::Value;

use crate::error::IngestError;

/// One category to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Position in the manifest array, for warning locations.
    pub index: usize,
    pub title: String,
    pub slug: String,
    pub file: String,
}

impl ManifestEntry {
    #[must_use]
    pub fn location(&self) -> String {
        format!("manifest[{}]", self.index)
    }
}

/// Parse manifest text into its usable entries.
///
/// # Errors
///
/// Returns `IngestError::Json` for unparseable text and
/// `IngestError::Manifest` when the document is not an array.
pub fn parse_manifest(
    name: &str,
    text: &str,
    report: &mut IngestReport,
) -> Result<Vec<ManifestEntry>, IngestError> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        name: name.to_string(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(IngestError::Manifest(format!(
            "'{name}' must be a JSON array of categories"
        )));
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match parse_entry(index, item) {
            Ok(entry) => entries.push(entry),
            Err(message) => {
                let location = format!("manifest[{index}]");
                tracing::warn!(%location, %message, "skipping manifest entry");
                report.warn(location, message);
            }
        }
    }
    Ok(entries)
}

fn parse_entry(index: usize, item: &Value) -> Result<ManifestEntry, String> {
    if !item.is_object() {
        return Err("entry is not an object".to_string());
    }
    let title = non_blank(item, "title").ok_or("missing title")?;
    let file = non_blank(item, "file").ok_or("missing file reference")?;
    let slug = slug_or_derive(non_blank(item, "slug"), title);

    Ok(ManifestEntry {
        index,
        title: title.to_string(),
        slug,
        file: file.to_string(),
    })
}

fn non_blank<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
