//! Generic result grid
//!
//! Columns come from the first row; every later row is projected onto them.
//! Cell formatting is driven by the column name, and only `duration` gets
//! special treatment.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::row::Row;

pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What the result area shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    NoData,
    Grid(Grid),
}

impl ResultView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_DATA),
            Self::Grid(_) => None,
        }
    }
}

/// Render rows into a grid. Total: never fails on drifting row shapes.
pub fn render(rows: &[Row]) -> ResultView {
    let Some(first) = rows.first() else {
        return ResultView::NoData;
    };

    let columns = first.columns();
    let rows = rows
        .iter()
        .map(|row| {
            let fields = row.fields();
            columns
                .iter()
                .map(|column| format_cell(column, fields.get(column)))
                .collect()
        })
        .collect();

    ResultView::Grid(Grid { columns, rows })
}

pub fn format_cell(column: &str, value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(v) if column == "duration" => format_duration(v),
        Some(v) => display_value(v),
    }
}

/// Seconds as `"{minutes}m {seconds}s"`
pub fn format_duration(value: &Value) -> String {
    if let Some(seconds) = value.as_i64() {
        return format_seconds(seconds);
    }
    match value.as_f64() {
        Some(seconds) => {
            let minutes = (seconds / 60.0).floor();
            format!("{}m {}s", minutes, seconds - minutes * 60.0)
        }
        None => display_value(value),
    }
}

pub fn format_seconds(seconds: i64) -> String {
    format!("{}m {}s", seconds.div_euclid(60), seconds.rem_euclid(60))
}

/// Default string form of a JSON value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Instant shown in the viewer's local time
pub fn format_local<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
