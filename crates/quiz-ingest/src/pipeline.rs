//! Best-effort, idempotent ingestion of a manifest and its category documents.

use quiz_core::responses::IngestReport;
use quiz_db::error::DatabaseError;
use quiz_db::repos::category::Upserted;
use quiz_db::service::QuizService;
use serde_json::Value;

use crate::document::parse_document;
use crate::error::IngestError;
use crate::manifest::{ManifestEntry, parse_manifest};
use crate::source::DocumentSource;

/// Drives [`QuizService`] from documents read out of a [`DocumentSource`].
///
/// Categories are processed strictly in manifest order, one at a time. Each
/// category upsert and each question create is its own transaction, so a
/// failure part-way through a category keeps whatever was already applied.
pub struct IngestionPipeline<'a, S> {
    service: &'a QuizService,
    source: S,
}

impl<'a, S: DocumentSource> IngestionPipeline<'a, S> {
    pub const fn new(service: &'a QuizService, source: S) -> Self {
        Self { service, source }
    }

    /// Ingest everything the manifest named `manifest` references.
    ///
    /// # Errors
    ///
    /// Only a missing, unreadable, or non-array manifest fails the run.
    /// Everything else is recorded in the returned report's warnings.
    pub async fn run(&self, manifest: &str) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();
        let text = self.source.read(manifest)?;
        let entries = parse_manifest(manifest, &text, &mut report)?;
        tracing::info!(manifest, categories = entries.len(), "starting ingestion");

        for entry in &entries {
            if let Err(e) = self.ingest_category(entry, &mut report).await {
                tracing::error!(
                    slug = %entry.slug,
                    file = %entry.file,
                    error = %e,
                    "category ingestion failed"
                );
                report.warn(entry.location(), format!("category '{}' failed: {e}", entry.slug));
            }
        }

        tracing::info!(
            categories_created = report.categories_created,
            categories_updated = report.categories_updated,
            questions_created = report.questions_created,
            questions_skipped = report.questions_skipped,
            warnings = report.warnings.len(),
            "ingestion finished"
        );
        Ok(report)
    }

    /// Upsert one category and create its missing questions.
    ///
    /// Document problems are warnings and return `Ok`, as does a store error
    /// on a single question. Only a failed upsert stops the category.
    async fn ingest_category(
        &self,
        entry: &ManifestEntry,
        report: &mut IngestReport,
    ) -> Result<(), DatabaseError> {
        let Some(document) = self.load_document(entry, report) else {
            return Ok(());
        };
        let questions = match parse_document(&entry.file, &document, report) {
            Ok(questions) => questions,
            Err(message) => {
                tracing::warn!(file = %entry.file, %message, "skipping category");
                report.warn(entry.file.clone(), format!("{message}; category skipped"));
                return Ok(());
            }
        };

        let (category, outcome) = self
            .service
            .upsert_category(&entry.slug, &entry.title)
            .await?;
        match outcome {
            Upserted::Created => report.categories_created += 1,
            Upserted::Updated => report.categories_updated += 1,
            Upserted::Unchanged => report.categories_unchanged += 1,
        }

        for parsed in questions {
            let created = self
                .service
                .create_question_if_absent(&parsed.question, category.id, &parsed.answers)
                .await;
            match created {
                Ok(Some(q)) => {
                    report.questions_created += 1;
                    report.answers_created += count(q.answers.len());
                }
                Ok(None) => report.questions_skipped += 1,
                Err(e) => {
                    let location = format!("{}: questions[{}]", entry.file, parsed.index);
                    tracing::error!(%location, error = %e, "question ingestion failed");
                    report.warn(location, format!("question not stored: {e}"));
                }
            }
        }
        Ok(())
    }

    fn load_document(&self, entry: &ManifestEntry, report: &mut IngestReport) -> Option<Value> {
        let parsed = self.source.read(&entry.file).and_then(|text| {
            serde_json::from_str::<Value>(&text).map_err(|source| IngestError::Json {
                name: entry.file.clone(),
                source,
            })
        });
        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(file = %entry.file, error = %e, "skipping category");
                report.warn(entry.location(), e.to_string());
                None
            }
        }
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
