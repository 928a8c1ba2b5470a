use thiserror::Error;

/// Error taxonomy for the quality-assessment core.
///
/// Every variant is terminal for the single operation that raised it; the
/// only internal retry anywhere in the core is the delimiter fallback in
/// the loader, which happens before `ParseError` is produced.
#[derive(Debug, Error)]
pub enum QualityError {
    #[error("not a recognized tabular file: {filename}")]
    InvalidFileType { filename: String },
    #[error("input file is empty")]
    EmptyFile,
    #[error("could not parse delimited input: {detail}")]
    ParseError { detail: String },
    #[error("failed to load input: {detail}")]
    LoadError { detail: String },
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },
    #[error("malformed rule: {detail}")]
    MalformedRule { detail: String },
    #[error("unsupported rule kind: {kind}")]
    UnsupportedRule { kind: String },
}

impl QualityError {
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    pub fn malformed_rule(detail: impl Into<String>) -> Self {
        Self::MalformedRule {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QualityError>;
