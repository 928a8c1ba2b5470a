#![deny(unsafe_code)]

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::error::{QualityError, Result};

/// A single cell of the table.
///
/// Loading only ever produces `Missing` and `Text`; the typed variants
/// exist so metrics can coerce lazily at the point of comparison instead
/// of the table being typed eagerly at load time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Missing,
    Text(String),
    Number(f64),
    Temporal(NaiveDateTime),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell: `Number` directly, `Text` parsed on demand.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => t.trim().parse().ok(),
            Self::Missing | Self::Temporal(_) => None,
        }
    }

    /// Textual form used for equality, membership, and pattern checks.
    /// `Missing` renders as the empty string.
    pub fn text_form(&self) -> Cow<'_, str> {
        match self {
            Self::Missing => Cow::Borrowed(""),
            Self::Text(t) => Cow::Borrowed(t),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Temporal(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

/// A named column with its cells in row order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// An in-memory table: ordered named columns, rows aligned by position.
///
/// The loader guarantees every column has the same length. Metrics read
/// the table by shared reference and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. A duplicate name replaces the earlier column in
    /// place (later occurrence wins); the original position is kept.
    pub fn push_column(&mut self, column: Column) {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| QualityError::column_not_found(name))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn duplicate_column_name_replaces_in_place() {
        let mut table = Table::new();
        table.push_column(Column::new("id", vec![text("1")]));
        table.push_column(Column::new("name", vec![text("a")]));
        table.push_column(Column::new("id", vec![text("2")]));

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(table.column("id").unwrap().cells, vec![text("2")]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = Table::new();
        let err = table.column("absent").unwrap_err();
        assert!(matches!(err, QualityError::ColumnNotFound { column } if column == "absent"));
    }

    #[test]
    fn as_number_parses_text_lazily() {
        assert_eq!(text(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(text("abc").as_number(), None);
        assert_eq!(CellValue::Number(2.0).as_number(), Some(2.0));
        assert_eq!(CellValue::Missing.as_number(), None);
    }

    #[test]
    fn cell_value_serializes_tagged() {
        let json = serde_json::to_string(&text("x")).unwrap();
        assert_eq!(json, r#"{"kind":"Text","value":"x"}"#);
    }
}
