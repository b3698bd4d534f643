//! # quiz-ingest
//!
//! Loads category trees from a manifest plus one JSON document per category.
//!
//! Runs are idempotent: categories are upserted by slug and a question is
//! only created when its category holds no question with the same text.
//! Malformed items are skipped and reported as warnings; the batch goes on.

pub mod document;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod source;

pub use error::IngestError;
pub use pipeline::IngestionPipeline;
pub use source::{DirSource, DocumentSource, MemorySource};
