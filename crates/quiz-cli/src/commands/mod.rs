pub mod ingest;
pub mod serve;
