// src/chart/mod.rs

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::process::dates::TaskEntry;

/// Declarative, renderer-agnostic description of one Gantt chart.
/// Built once per valid source and never mutated; the serialized form is
/// what gets handed to the external rendering capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    /// Source name (file name, or the pasted-data label).
    pub title: String,
    /// One horizontal bar per input row, in original row order.
    pub bars: Vec<Bar>,
    pub x_axis: TimeAxis,
    pub y_axis: CategoryAxis,
    pub show_legend: bool,
}

/// A single bar spanning [start, end], labeled by task name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Time-based x-axis with one tick per covered month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeAxis {
    pub title: String,
    /// Earliest start → latest end across all bars; `None` when there are
    /// no bars.
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub ticks: Vec<Tick>,
}

/// One tick mark at the first of a month, labeled `Jan 2024` style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub at: NaiveDate,
    pub label: String,
}

/// Category y-axis: task names in table row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAxis {
    pub title: String,
    pub categories: Vec<String>,
}

/// Build the chart spec for one normalized table. Pure and deterministic:
/// the same tasks and title always serialize to identical bytes.
pub fn build_chart_spec(tasks: &[TaskEntry], title: &str) -> ChartSpec {
    let bars: Vec<Bar> = tasks
        .iter()
        .map(|t| Bar {
            label: t.activity.clone(),
            start: t.start,
            end: t.end,
        })
        .collect();

    let range = match (
        bars.iter().map(|b| b.start).min(),
        bars.iter().map(|b| b.end).max(),
    ) {
        (Some(min), Some(max)) => Some((min, max)),
        _ => None,
    };

    let ticks = match range {
        Some((min, max)) => month_ticks(min, max),
        None => Vec::new(),
    };

    ChartSpec {
        title: title.to_string(),
        bars,
        x_axis: TimeAxis {
            title: "Timeline".to_string(),
            range,
            ticks,
        },
        y_axis: CategoryAxis {
            title: "Tasks".to_string(),
            categories: tasks.iter().map(|t| t.activity.clone()).collect(),
        },
        show_legend: false,
    }
}

/// One tick at the first of every month from `min`'s month through `max`'s
/// month, labeled with abbreviated month and year.
fn month_ticks(min: NaiveDate, max: NaiveDate) -> Vec<Tick> {
    let mut ticks = Vec::new();
    // with_day(1) cannot fail for an already-valid date
    let mut current = min.with_day(1).unwrap();
    let last = max.with_day(1).unwrap();

    while current <= last {
        ticks.push(Tick {
            at: current,
            label: current.format("%b %Y").to_string(),
        });
        current = current + Months::new(1);
    }

    ticks
}
