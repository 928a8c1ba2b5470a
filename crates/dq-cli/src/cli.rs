//! CLI argument definitions for the data-quality tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Assess data-quality dimensions of a delimited tabular file",
    long_about = "Assess data-quality dimensions of a delimited tabular file.\n\n\
                  Completeness and uniqueness always run; timeliness and\n\
                  validity run when configured via flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assess a delimited file and print a quality report.
    Assess(AssessArgs),

    /// List the supported metrics and validity rule kinds.
    Metrics,
}

#[derive(Parser)]
pub struct AssessArgs {
    /// Path to the delimited input file (.csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Date columns to assess for timeliness (comma-separated).
    #[arg(long = "date-columns", value_name = "COLS", value_delimiter = ',')]
    pub date_columns: Vec<String>,

    /// Column holding the time-of-day component for the timeliness gate.
    #[arg(long = "time-column", value_name = "COL", requires = "date_columns")]
    pub time_column: Option<String>,

    /// Reporting frequency defining the recency unit.
    #[arg(long = "frequency", value_enum, default_value = "daily")]
    pub frequency: FrequencyArg,

    /// Recency window as a count of frequency units (default: one unit).
    #[arg(long = "cutoff", value_name = "N", conflicts_with = "cutoff_time")]
    pub cutoff: Option<u32>,

    /// Latest acceptable time of day (HH:MM or HH:MM:SS); gates rows by
    /// the time column.
    #[arg(long = "cutoff-time", value_name = "TIME")]
    pub cutoff_time: Option<String>,

    /// Column to evaluate the validity rule against.
    #[arg(long = "rule-column", value_name = "COL", requires = "rule_kind")]
    pub rule_column: Option<String>,

    /// Validity rule kind (equal, min, max, in, between, regex).
    #[arg(long = "rule-kind", value_name = "KIND", requires = "rule_column")]
    pub rule_kind: Option<String>,

    /// Rule operand: a JSON array for `in`/`between`, a plain value
    /// otherwise.
    #[arg(long = "rule-operand", value_name = "VALUE", requires = "rule_kind")]
    pub rule_operand: Option<String>,

    /// Emit the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI frequency choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
