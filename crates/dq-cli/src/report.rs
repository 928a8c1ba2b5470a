//! Assessment orchestration: load a table once, run the selected
//! metrics against it, and collect a single report value.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use dq_model::{MetricResult, Table, TimelinessConfig, ValidityRule};

/// Which optional metrics to run on top of completeness and uniqueness.
#[derive(Debug, Clone, Default)]
pub struct AssessOptions {
    pub timeliness: Option<TimelinessConfig>,
    pub validity: Option<ValiditySelection>,
}

/// Column and rule chosen for the validity metric.
#[derive(Debug, Clone)]
pub struct ValiditySelection {
    pub column: String,
    pub rule: ValidityRule,
}

/// Result of running the validity rule.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidityOutcome {
    pub column: String,
    pub kind: String,
    pub percent: f64,
}

/// One full assessment over a single table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AssessmentReport {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub completeness: MetricResult,
    pub uniqueness: MetricResult,
    pub timeliness: Option<MetricResult>,
    pub validity: Option<ValidityOutcome>,
}

/// Load a delimited file from disk and assess it.
pub fn assess_file(path: &Path, options: &AssessOptions) -> Result<AssessmentReport> {
    let table = dq_ingest::load_path(path).with_context(|| format!("load {}", path.display()))?;
    assess_table(&table, path.display().to_string(), options)
}

/// Run the selected metrics against an already-loaded table.
///
/// Completeness and uniqueness always run; timeliness and validity run
/// when configured. The table is only read, never mutated.
pub fn assess_table(
    table: &Table,
    source: String,
    options: &AssessOptions,
) -> Result<AssessmentReport> {
    let span = info_span!("assess", source = %source);
    let _guard = span.enter();
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "assessing table"
    );

    let completeness = dq_metrics::completeness(table);
    let uniqueness = dq_metrics::uniqueness(table);
    let timeliness = options
        .timeliness
        .as_ref()
        .map(|config| dq_metrics::timeliness(table, config))
        .transpose()
        .context("timeliness")?;
    let validity = options
        .validity
        .as_ref()
        .map(|selection| {
            dq_metrics::validity(table, &selection.column, &selection.rule).map(|percent| {
                ValidityOutcome {
                    column: selection.column.clone(),
                    kind: selection.rule.kind.as_str().to_string(),
                    percent,
                }
            })
        })
        .transpose()
        .context("validity")?;

    Ok(AssessmentReport {
        source,
        rows: table.row_count(),
        columns: table.column_count(),
        completeness,
        uniqueness,
        timeliness,
        validity,
    })
}
