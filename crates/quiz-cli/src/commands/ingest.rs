use anyhow::Context;
use quiz_config::QuizConfig;
use quiz_db::service::QuizService;
use quiz_ingest::{DirSource, IngestionPipeline};

use crate::cli::GlobalFlags;
use crate::output::output;

/// Run one ingestion pass and print its report.
///
/// Item-level warnings are part of the report and do not fail the command.
/// In quiet mode the report is not printed.
pub async fn handle(config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = QuizService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;

    let source = DirSource::new(config.ingest.data_dir_path());
    let report = IngestionPipeline::new(&service, source)
        .run(&config.ingest.manifest)
        .await
        .with_context(|| {
            format!(
                "ingestion of {} in {} failed",
                config.ingest.manifest, config.ingest.data_dir
            )
        })?;

    if flags.quiet {
        return Ok(());
    }
    output(&report, flags.format)
}
