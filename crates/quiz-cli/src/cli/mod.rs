use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `quiz` binary.
#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Quiz content store and HTTP API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API until interrupted
    Serve(ServeArgs),
    /// Load categories from a manifest and its category files
    Ingest(IngestArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// Database file (overrides database.path)
    #[arg(long)]
    pub database: Option<String>,
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Directory holding the manifest and category files (overrides ingest.data_dir)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Manifest file name inside the data directory (overrides ingest.manifest)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Database file (overrides database.path)
    #[arg(long)]
    pub database: Option<String>,
}
