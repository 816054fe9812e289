// src/process/dates.rs

use chrono::NaiveDate;
use thiserror::Error;

use super::validate::TaskRow;

/// One fully normalized row: a single Gantt bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub activity: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Date validation is all-or-nothing per source: one bad row rejects the
/// whole table so no partial chart is ever produced.
#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date format in row {row}: {value:?} (expected MM/DD/YYYY)")]
    InvalidFormat { row: usize, value: String },
    #[error("start date {start} is after end date {end} in row {row} ({activity:?})")]
    InvertedRange {
        row: usize,
        activity: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Strict parse of `MM/DD/YYYY` → `NaiveDate`.
/// Two-digit month and day, four-digit year; anything else is rejected,
/// including calendar-invalid combinations like `13/40/2024`.
pub fn parse_mdy(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // exact length + separator positions, digits everywhere else
    if s.len() != 10 {
        return None;
    }
    let ok = s.bytes().enumerate().all(|(i, b)| {
        if i == 2 || i == 5 {
            b == b'/'
        } else {
            b.is_ascii_digit()
        }
    });
    if !ok {
        return None;
    }
    let month: u32 = s[0..2].parse().ok()?;
    let day: u32 = s[3..5].parse().ok()?;
    let year: i32 = s[6..10].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Replace the two raw date columns with parsed calendar dates.
///
/// Fails the whole table with `InvalidFormat` on the first unparseable start
/// or end, then with `InvertedRange` if any row starts strictly after it
/// ends. Row numbers in errors are 1-based data-row positions.
pub fn normalize(rows: Vec<TaskRow>) -> Result<Vec<TaskEntry>, DateError> {
    let mut entries = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        let start = parse_mdy(&row.start_text).ok_or_else(|| DateError::InvalidFormat {
            row: idx + 1,
            value: row.start_text.clone(),
        })?;
        let end = parse_mdy(&row.end_text).ok_or_else(|| DateError::InvalidFormat {
            row: idx + 1,
            value: row.end_text.clone(),
        })?;
        entries.push(TaskEntry {
            activity: row.activity,
            start,
            end,
        });
    }

    for (idx, entry) in entries.iter().enumerate() {
        if entry.start > entry.end {
            return Err(DateError::InvertedRange {
                row: idx + 1,
                activity: entry.activity.clone(),
                start: entry.start,
                end: entry.end,
            });
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(activity: &str, start: &str, end: &str) -> TaskRow {
        TaskRow {
            activity: activity.to_string(),
            start_text: start.to_string(),
            end_text: end.to_string(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_exact_mdy() {
        assert_eq!(parse_mdy("12/31/2024"), Some(ymd(2024, 12, 31)));
        assert_eq!(parse_mdy("01/01/2024"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_mdy(" 02/29/2024 "), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn rejects_non_matching_formats() {
        // single-digit month/day
        assert_eq!(parse_mdy("1/1/2024"), None);
        // wrong separators and orders
        assert_eq!(parse_mdy("2024/01/01"), None);
        assert_eq!(parse_mdy("01-01-2024"), None);
        // calendar-invalid
        assert_eq!(parse_mdy("13/40/2024"), None);
        assert_eq!(parse_mdy("02/30/2024"), None);
        // stray characters
        assert_eq!(parse_mdy("0a/01/2024"), None);
        assert_eq!(parse_mdy(""), None);
    }

    #[test]
    fn normalize_replaces_text_with_dates() {
        let entries = normalize(vec![row("Design", "01/01/2024", "02/01/2024")]).unwrap();
        assert_eq!(
            entries,
            vec![TaskEntry {
                activity: "Design".to_string(),
                start: ymd(2024, 1, 1),
                end: ymd(2024, 2, 1),
            }]
        );
    }

    #[test]
    fn one_bad_date_fails_the_whole_table() {
        let err = normalize(vec![
            row("Design", "01/01/2024", "02/01/2024"),
            row("Build", "13/40/2024", "03/01/2024"),
        ])
        .unwrap_err();

        match err {
            DateError::InvalidFormat { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "13/40/2024");
            }
            other => panic!("expected invalid format, got {other}"),
        }
    }

    #[test]
    fn inverted_range_fails_the_whole_table() {
        let err = normalize(vec![
            row("Design", "01/01/2024", "02/01/2024"),
            row("Build", "03/01/2024", "01/01/2024"),
        ])
        .unwrap_err();

        match err {
            DateError::InvertedRange { row, activity, .. } => {
                assert_eq!(row, 2);
                assert_eq!(activity, "Build");
            }
            other => panic!("expected inverted range, got {other}"),
        }
    }

    #[test]
    fn equal_start_and_end_is_allowed() {
        let entries = normalize(vec![row("Kickoff", "01/15/2024", "01/15/2024")]).unwrap();
        assert_eq!(entries[0].start, entries[0].end);
    }

    #[test]
    fn format_errors_win_over_range_errors() {
        // the bad format in row 2 is reported even though row 1 is inverted
        let err = normalize(vec![
            row("Design", "03/01/2024", "01/01/2024"),
            row("Build", "oops", "03/01/2024"),
        ])
        .unwrap_err();
        assert!(matches!(err, DateError::InvalidFormat { row: 2, .. }));
    }
}
