use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use comfy_table::Table;

use dq_cli::report::{AssessOptions, AssessmentReport, ValiditySelection, assess_file};
use dq_model::{Cutoff, Frequency, RuleKind, RuleOperand, TimelinessConfig, ValidityRule};

use crate::cli::{AssessArgs, FrequencyArg};
use crate::summary::apply_table_style;

pub fn run_assess(args: &AssessArgs) -> Result<AssessmentReport> {
    let options = build_options(args)?;
    assess_file(&args.file, &options)
}

pub fn run_metrics() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Description"]);
    apply_table_style(&mut table);
    table.add_row(vec!["completeness", "fraction of non-missing values per column"]);
    table.add_row(vec![
        "uniqueness",
        "fraction of distinct values per column (missing counts as one)",
    ]);
    table.add_row(vec![
        "timeliness",
        "fraction of rows whose date falls within the recency window",
    ]);
    table.add_row(vec![
        "validity",
        "fraction of rows in a column satisfying a rule",
    ]);
    println!("{table}");

    let kinds: Vec<&str> = RuleKind::ALL.iter().map(|kind| kind.as_str()).collect();
    println!("Validity rule kinds: {}", kinds.join(", "));
    Ok(())
}

fn build_options(args: &AssessArgs) -> Result<AssessOptions> {
    let timeliness = if args.date_columns.is_empty() {
        None
    } else {
        let mut config =
            TimelinessConfig::new(args.date_columns.clone(), frequency_from(args.frequency));
        if let Some(column) = &args.time_column {
            config = config.with_time_column(column.clone());
        }
        if let Some(units) = args.cutoff {
            config = config.with_cutoff(Cutoff::Units(units));
        } else if let Some(raw) = &args.cutoff_time {
            config = config.with_cutoff(Cutoff::TimeOfDay(parse_cutoff_time(raw)?));
        }
        Some(config)
    };

    let validity = match (&args.rule_column, &args.rule_kind) {
        (Some(column), Some(kind)) => {
            let kind = RuleKind::parse(kind)?;
            let raw = args
                .rule_operand
                .as_deref()
                .context("--rule-operand is required with --rule-kind")?;
            let operand = parse_operand(kind, raw)?;
            Some(ValiditySelection {
                column: column.clone(),
                rule: ValidityRule::new(kind, operand),
            })
        }
        _ => None,
    };

    Ok(AssessOptions {
        timeliness,
        validity,
    })
}

fn frequency_from(arg: FrequencyArg) -> Frequency {
    match arg {
        FrequencyArg::Daily => Frequency::Daily,
        FrequencyArg::Weekly => Frequency::Weekly,
        FrequencyArg::Monthly => Frequency::Monthly,
        FrequencyArg::Quarterly => Frequency::Quarterly,
        FrequencyArg::Yearly => Frequency::Yearly,
    }
}

fn parse_cutoff_time(raw: &str) -> Result<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .with_context(|| format!("invalid --cutoff-time {raw:?}, expected HH:MM or HH:MM:SS"))
}

/// `in` and `between` take a JSON array operand; the other kinds take
/// the raw value as a scalar.
fn parse_operand(kind: RuleKind, raw: &str) -> Result<RuleOperand> {
    match kind {
        RuleKind::In | RuleKind::Between => {
            let value: serde_json::Value = serde_json::from_str(raw)
                .with_context(|| format!("operand for {} must be a JSON array", kind.as_str()))?;
            let serde_json::Value::Array(items) = value else {
                bail!("operand for {} must be a JSON array", kind.as_str());
            };
            let values = items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect();
            Ok(RuleOperand::List(values))
        }
        RuleKind::Equal | RuleKind::Min | RuleKind::Max | RuleKind::Regex => {
            Ok(RuleOperand::Scalar(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_array_accepts_mixed_scalars() {
        let operand = parse_operand(RuleKind::Between, "[2, 5]").unwrap();
        assert_eq!(
            operand,
            RuleOperand::List(vec!["2".to_string(), "5".to_string()])
        );

        let operand = parse_operand(RuleKind::In, r#"["red", "blue"]"#).unwrap();
        assert_eq!(
            operand,
            RuleOperand::List(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn operand_for_scalar_kinds_is_taken_verbatim() {
        let operand = parse_operand(RuleKind::Regex, r"^\d+$").unwrap();
        assert_eq!(operand, RuleOperand::Scalar(r"^\d+$".to_string()));
    }

    #[test]
    fn non_array_operand_for_in_is_rejected() {
        assert!(parse_operand(RuleKind::In, "red").is_err());
    }

    #[test]
    fn cutoff_time_parses_both_precisions() {
        assert_eq!(
            parse_cutoff_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_cutoff_time("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(parse_cutoff_time("half past nine").is_err());
    }
}
