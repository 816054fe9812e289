// src/process/validate.rs

use std::collections::BTreeSet;
use thiserror::Error;

use super::RecordTable;

/// Column holding the task name shown on the y-axis.
pub const ACTIVITY_COLUMN: &str = "Activitati";
/// Column holding the estimated start date.
pub const START_COLUMN: &str = "Data estimativa inceput";
/// Column holding the estimated end date.
pub const END_COLUMN: &str = "Data estimativa finalizare";

/// The fixed schema a table must carry to chart at all.
pub const REQUIRED_COLUMNS: [&str; 3] = [ACTIVITY_COLUMN, START_COLUMN, END_COLUMN];

/// One row projected down to the required schema. Extra columns have been
/// discarded; the date fields are still raw text at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub activity: String,
    pub start_text: String,
    pub end_text: String,
}

/// The table lacks one or more required columns. `missing_columns` is the
/// complete set difference (required − present), never just the first hit,
/// and iterates in a deterministic order.
#[derive(Debug, Error)]
#[error("missing required columns: {}", missing_list(.missing_columns))]
pub struct ValidationError {
    pub missing_columns: BTreeSet<String>,
}

fn missing_list(missing: &BTreeSet<String>) -> String {
    missing.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Check the required schema and project the table down to it.
///
/// Matching is exact and case-sensitive. On success, every row is reduced to
/// a `TaskRow` in original row order.
pub fn validate(table: &RecordTable) -> Result<Vec<TaskRow>, ValidationError> {
    let missing_columns: BTreeSet<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing_columns.is_empty() {
        return Err(ValidationError { missing_columns });
    }

    // indices are guaranteed present by the check above
    let activity_idx = table.column_index(ACTIVITY_COLUMN).unwrap();
    let start_idx = table.column_index(START_COLUMN).unwrap();
    let end_idx = table.column_index(END_COLUMN).unwrap();

    let rows = table
        .rows
        .iter()
        .map(|row| TaskRow {
            activity: row[activity_idx].clone(),
            start_text: row[start_idx].clone(),
            end_text: row[end_idx].clone(),
        })
        .collect();

    Ok(rows)
}
