pub mod chart;
pub mod ingest;
pub mod process;
