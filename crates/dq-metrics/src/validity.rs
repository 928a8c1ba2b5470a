use regex::Regex;

use dq_model::{CellValue, QualityError, Result, RuleKind, RuleOperand, Table, ValidityRule};

/// Operand checked and coerced once, before any row is scored.
enum Check {
    Equal { text: String, number: Option<f64> },
    Min(f64),
    Max(f64),
    In(Vec<String>),
    Between(f64, f64),
    Regex(Regex),
}

fn scalar_operand<'a>(rule: &'a ValidityRule) -> Result<&'a str> {
    match &rule.operand {
        RuleOperand::Scalar(value) => Ok(value),
        RuleOperand::List(_) => Err(QualityError::malformed_rule(format!(
            "{} expects a single operand value",
            rule.kind.as_str()
        ))),
    }
}

fn list_operand<'a>(rule: &'a ValidityRule) -> Result<&'a [String]> {
    match &rule.operand {
        RuleOperand::List(values) => Ok(values),
        RuleOperand::Scalar(_) => Err(QualityError::malformed_rule(format!(
            "{} expects a list operand",
            rule.kind.as_str()
        ))),
    }
}

fn numeric_bound(rule: &ValidityRule, raw: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| {
        QualityError::malformed_rule(format!(
            "{} expects a numeric bound, got {raw:?}",
            rule.kind.as_str()
        ))
    })
}

fn compile(rule: &ValidityRule) -> Result<Check> {
    match rule.kind {
        RuleKind::Equal => {
            let value = scalar_operand(rule)?;
            Ok(Check::Equal {
                text: value.to_string(),
                number: value.trim().parse().ok(),
            })
        }
        RuleKind::Min => Ok(Check::Min(numeric_bound(rule, scalar_operand(rule)?)?)),
        RuleKind::Max => Ok(Check::Max(numeric_bound(rule, scalar_operand(rule)?)?)),
        RuleKind::In => {
            let values = list_operand(rule)?;
            Ok(Check::In(
                values.iter().map(|v| v.trim().to_string()).collect(),
            ))
        }
        RuleKind::Between => {
            let values = list_operand(rule)?;
            let [lower, upper] = values else {
                return Err(QualityError::malformed_rule(format!(
                    "between expects exactly two bounds, got {}",
                    values.len()
                )));
            };
            Ok(Check::Between(
                numeric_bound(rule, lower)?,
                numeric_bound(rule, upper)?,
            ))
        }
        RuleKind::Regex => {
            let pattern = scalar_operand(rule)?;
            // Anchor at the start: match-from-start semantics, not
            // full-string, unless the pattern itself anchors the end.
            let anchored = format!("^(?:{pattern})");
            let regex = Regex::new(&anchored).map_err(|err| {
                QualityError::malformed_rule(format!("invalid pattern {pattern:?}: {err}"))
            })?;
            Ok(Check::Regex(regex))
        }
    }
}

fn cell_passes(check: &Check, cell: &CellValue) -> bool {
    if cell.is_missing() {
        return false;
    }
    match check {
        Check::Equal { text, number } => match (number, cell.as_number()) {
            (Some(operand), Some(value)) => value == *operand,
            _ => cell.text_form() == *text,
        },
        Check::Min(bound) => cell.as_number().is_some_and(|value| value >= *bound),
        Check::Max(bound) => cell.as_number().is_some_and(|value| value <= *bound),
        Check::In(values) => {
            let text = cell.text_form();
            let trimmed = text.trim();
            values.iter().any(|value| value == trimmed)
        }
        Check::Between(lower, upper) => cell
            .as_number()
            .is_some_and(|value| value >= *lower && value <= *upper),
        Check::Regex(regex) => regex.is_match(&cell.text_form()),
    }
}

/// Percentage of rows in `column` whose cell satisfies `rule`.
///
/// The operand is validated before any row is scored, so a malformed
/// rule (wrong operand shape, non-numeric bound, invalid pattern) fails
/// fast instead of silently computing a wrong percentage. Missing cells
/// fail every rule kind. A zero-row table scores 0.0.
pub fn validity(table: &Table, column: &str, rule: &ValidityRule) -> Result<f64> {
    let column = table.column(column)?;
    let check = compile(rule)?;

    let rows = table.row_count();
    if rows == 0 {
        return Ok(0.0);
    }
    let passing = column
        .cells
        .iter()
        .filter(|cell| cell_passes(&check, cell))
        .count();
    Ok(100.0 * passing as f64 / rows as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::Column;

    fn table_of(values: &[&str]) -> Table {
        let cells = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    CellValue::Missing
                } else {
                    CellValue::Text((*v).to_string())
                }
            })
            .collect();
        let mut table = Table::new();
        table.push_column(Column::new("c", cells));
        table
    }

    #[test]
    fn equal_compares_numerically_when_both_sides_parse() {
        let table = table_of(&["1.0", "1", "2"]);
        let percent = validity(&table, "c", &ValidityRule::equal("1")).unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn equal_falls_back_to_text_comparison() {
        let table = table_of(&["yes", "no", "yes"]);
        let percent = validity(&table, "c", &ValidityRule::equal("yes")).unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn min_fails_non_numeric_cells() {
        let table = table_of(&["5", "abc", "10", ""]);
        let percent = validity(&table, "c", &ValidityRule::min("6")).unwrap();
        assert_eq!(percent, 25.0);
    }

    #[test]
    fn max_is_inclusive() {
        let table = table_of(&["5", "6", "7"]);
        let percent = validity(&table, "c", &ValidityRule::max("6")).unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn in_matches_trimmed_text() {
        let table = table_of(&["red", "blue", "green"]);
        let rule = ValidityRule::is_in(vec![" red ".to_string(), "green".to_string()]);
        let percent = validity(&table, "c", &rule).unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let table = table_of(&["red"]);
        let percent = validity(&table, "c", &ValidityRule::is_in(Vec::new())).unwrap();
        assert_eq!(percent, 0.0);
    }

    #[test]
    fn regex_matches_from_start_only() {
        let table = table_of(&["abc1", "zabc", "abcd"]);
        let percent = validity(&table, "c", &ValidityRule::regex("abc")).unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_pattern_matches_everything() {
        let table = table_of(&["x", "y"]);
        let percent = validity(&table, "c", &ValidityRule::regex("")).unwrap();
        assert_eq!(percent, 100.0);
    }

    #[test]
    fn invalid_pattern_is_malformed() {
        let table = table_of(&["x"]);
        let err = validity(&table, "c", &ValidityRule::regex("(unclosed")).unwrap_err();
        assert!(matches!(err, QualityError::MalformedRule { .. }));
    }

    #[test]
    fn wrong_operand_shape_is_malformed() {
        let table = table_of(&["x"]);
        let list_rule = ValidityRule::new(
            RuleKind::Equal,
            RuleOperand::List(vec!["a".to_string(), "b".to_string()]),
        );
        assert!(matches!(
            validity(&table, "c", &list_rule).unwrap_err(),
            QualityError::MalformedRule { .. }
        ));

        let scalar_rule = ValidityRule::new(RuleKind::In, RuleOperand::Scalar("a".to_string()));
        assert!(matches!(
            validity(&table, "c", &scalar_rule).unwrap_err(),
            QualityError::MalformedRule { .. }
        ));
    }

    #[test]
    fn unknown_column_is_reported() {
        let table = table_of(&["x"]);
        let err = validity(&table, "missing", &ValidityRule::equal("x")).unwrap_err();
        assert!(matches!(err, QualityError::ColumnNotFound { .. }));
    }
}
