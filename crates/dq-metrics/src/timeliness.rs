use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use dq_model::{CellValue, MetricResult, Result, Table, TimelinessConfig};

/// Date formats tried in order when coercing a cell to a date.
/// ISO forms come first; day-first is preferred over month-first for
/// slashed and dashed forms.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

fn coerce_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Temporal(dt) => Some(dt.date()),
        CellValue::Text(raw) => {
            let trimmed = raw.trim();
            for format in DATETIME_FORMATS {
                if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                    return Some(dt.date());
                }
            }
            for format in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                    return Some(date);
                }
            }
            None
        }
        CellValue::Missing | CellValue::Number(_) => None,
    }
}

fn coerce_time(cell: &CellValue) -> Option<NaiveTime> {
    match cell {
        CellValue::Temporal(dt) => Some(dt.time()),
        CellValue::Text(raw) => {
            let trimmed = raw.trim();
            for format in TIME_FORMATS {
                if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
                    return Some(time);
                }
            }
            None
        }
        CellValue::Missing | CellValue::Number(_) => None,
    }
}

/// Percentage of rows per selected date column whose date falls within
/// the configured recency window, evaluated against the current local
/// time.
pub fn timeliness(table: &Table, config: &TimelinessConfig) -> Result<MetricResult> {
    timeliness_at(table, config, Local::now().naive_local())
}

/// [`timeliness`] with an explicit reference moment.
///
/// A row is timely when its age in days is strictly below the window;
/// age exactly equal to the window is stale. When a time gate is active,
/// the row's time-of-day must additionally parse and be on or before the
/// cutoff. Unparseable dates stay in the denominator, and a column with
/// no parseable dates at all degrades to 0.0 instead of aborting the
/// batch. A selected column absent from the table is `ColumnNotFound`.
pub fn timeliness_at(
    table: &Table,
    config: &TimelinessConfig,
    now: NaiveDateTime,
) -> Result<MetricResult> {
    let window_days = config.window_days();
    let rows = table.row_count();
    let gate = match config.time_gate() {
        Some((column, cutoff)) => Some((table.column(column)?, cutoff)),
        None => None,
    };

    let mut result = MetricResult::new();
    for name in &config.date_columns {
        let column = table.column(name)?;
        if rows == 0 {
            result.insert(name.clone(), 0.0);
            continue;
        }

        let mut timely = 0usize;
        let mut parseable = 0usize;
        for (idx, cell) in column.cells.iter().enumerate() {
            let Some(date) = coerce_date(cell) else {
                continue;
            };
            parseable += 1;
            let age_days = (now.date() - date).num_days();
            if age_days >= window_days {
                continue;
            }
            if let Some((gate_column, cutoff_time)) = gate {
                let time = gate_column.cells.get(idx).and_then(coerce_time);
                match time {
                    Some(time) if time <= cutoff_time => {}
                    _ => continue,
                }
            }
            timely += 1;
        }

        let percent = if parseable == 0 {
            // Documented fallback: a column that never parses as dates
            // scores zero instead of failing the whole assessment.
            warn!(column = %name, "no date-parseable values; scoring 0");
            0.0
        } else {
            100.0 * timely as f64 / rows as f64
        };
        result.insert(name.clone(), percent);
    }
    Ok(result)
}
