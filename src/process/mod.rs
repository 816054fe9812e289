// src/process/mod.rs

use csv::ReaderBuilder;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

use crate::chart::{self, ChartSpec};
use crate::ingest::Source;

pub mod dates;
pub mod validate;

pub use dates::DateError;
pub use validate::ValidationError;

/// One CSV source parsed into an in-memory table.
/// Every cell is kept as a raw string; nothing is coerced to numbers or
/// dates here so the explicit date pass has full control over format and
/// error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    /// Column names from the header row, verbatim (no trimming).
    pub headers: Vec<String>,
    /// Each data row, one string per field, in file order.
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Index of `name` in the header row, exact case-sensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Structurally malformed CSV (ragged rows, bad quoting, missing header).
#[derive(Debug, Error)]
#[error("malformed CSV: {message}")]
pub struct ParseError {
    pub message: String,
}

/// Everything that can go wrong for one source. Errors are recovered at
/// this boundary: the caller reports them and moves on to the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Parse raw CSV text into a `RecordTable`.
///
/// A header row is required; blank lines are skipped; quoted fields are
/// honored. Rows whose field count differs from the header are a structural
/// failure for the whole source.
pub fn parse_csv(raw: &str) -> Result<RecordTable, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(raw.as_bytes()));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ParseError {
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ParseError {
            message: "no header row found".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| ParseError {
            message: format!("record {}: {}", idx + 1, e),
        })?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RecordTable { headers, rows })
}

/// Run one source through the full pipeline:
/// Ingest → Validate → Normalize → Build, short-circuiting at the first
/// failing stage. Pure with respect to everything but the input source.
pub fn process_source(source: &Source) -> Result<ChartSpec, SourceError> {
    let table = parse_csv(&source.text)?;
    debug!(source = %source.name, rows = table.rows.len(), "parsed CSV");

    let projected = validate::validate(&table)?;
    let tasks = dates::normalize(projected)?;

    Ok(chart::build_chart_spec(&tasks, &source.name))
}
