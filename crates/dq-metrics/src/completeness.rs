use dq_model::{MetricResult, Table};

/// Percentage of non-missing cells per column.
///
/// A zero-row table scores 0.0 for every column; NaN is never produced.
pub fn completeness(table: &Table) -> MetricResult {
    let rows = table.row_count();
    let mut result = MetricResult::new();
    for column in &table.columns {
        let percent = if rows == 0 {
            0.0
        } else {
            let filled = column.cells.iter().filter(|cell| !cell.is_missing()).count();
            100.0 * filled as f64 / rows as f64
        };
        result.insert(column.name.clone(), percent);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{CellValue, Column};

    fn table_with(cells: Vec<CellValue>) -> Table {
        let mut table = Table::new();
        table.push_column(Column::new("c", cells));
        table
    }

    #[test]
    fn full_column_scores_one_hundred() {
        let table = table_with(vec![
            CellValue::Text("a".to_string()),
            CellValue::Text("b".to_string()),
        ]);
        assert_eq!(completeness(&table).get("c"), Some(100.0));
    }

    #[test]
    fn missing_cells_lower_the_score() {
        let table = table_with(vec![
            CellValue::Text("a".to_string()),
            CellValue::Missing,
            CellValue::Missing,
            CellValue::Text("b".to_string()),
        ]);
        assert_eq!(completeness(&table).get("c"), Some(50.0));
    }

    #[test]
    fn zero_row_table_scores_zero() {
        let table = table_with(Vec::new());
        assert_eq!(completeness(&table).get("c"), Some(0.0));
    }
}
