use std::collections::BTreeSet;

use dq_model::{MetricResult, Table};

/// Percentage of distinct values per column.
///
/// All missing cells collapse into a single distinct value; everything
/// else compares by exact canonical text, with no case or whitespace
/// normalization beyond what loading already trimmed. A zero-row table
/// scores 0.0 (distinctness is meaningless there but must not fail).
pub fn uniqueness(table: &Table) -> MetricResult {
    let rows = table.row_count();
    let mut result = MetricResult::new();
    for column in &table.columns {
        let percent = if rows == 0 {
            0.0
        } else {
            let mut seen = BTreeSet::new();
            let mut saw_missing = false;
            for cell in &column.cells {
                if cell.is_missing() {
                    saw_missing = true;
                } else {
                    seen.insert(cell.text_form().into_owned());
                }
            }
            let distinct = seen.len() + usize::from(saw_missing);
            100.0 * distinct as f64 / rows as f64
        };
        result.insert(column.name.clone(), percent);
    }
    result
}
