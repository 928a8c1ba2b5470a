#![deny(unsafe_code)]

use std::path::Path;

use tracing::debug;

use dq_model::{CellValue, Column, QualityError, Result, Table};

/// Extensions accepted by upload validation, lowercase.
const RECOGNIZED_EXTENSIONS: &[&str] = &["csv"];

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

fn cell_from_field(raw: &str) -> CellValue {
    let trimmed = raw.trim_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

/// Validate an upload before (or instead of) loading it.
///
/// Rejects filenames without a recognized tabular extension and
/// zero-length content. Independent of parsing.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<()> {
    let recognized = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    if !recognized {
        return Err(QualityError::InvalidFileType {
            filename: filename.to_string(),
        });
    }
    if bytes.is_empty() {
        return Err(QualityError::EmptyFile);
    }
    Ok(())
}

/// Load raw file content into a [`Table`].
///
/// Parses with comma as the field separator first. A structural failure
/// (unequal field counts, broken quoting) is retried once with semicolon;
/// a second structural failure is a `ParseError`. Decoding failures
/// (invalid UTF-8, I/O) are `LoadError` and are not retried.
///
/// A comma parse that collapses everything into a single column while the
/// header line carries semicolons is treated as picking the wrong
/// delimiter, so the semicolon retry also applies there.
pub fn load(bytes: &[u8], filename: &str) -> Result<Table> {
    validate_upload(filename, bytes)?;

    match parse_table(bytes, b',') {
        Ok(table) => {
            if table.column_count() <= 1 && first_line_has_semicolon(bytes) {
                debug!(filename, "comma parse yielded one column; retrying with semicolon");
                if let Ok(retried) = parse_table(bytes, b';') {
                    if retried.column_count() > table.column_count() {
                        return Ok(retried);
                    }
                }
            }
            Ok(table)
        }
        Err(err) if is_decode_failure(&err) => Err(QualityError::LoadError {
            detail: err.to_string(),
        }),
        Err(comma_err) => {
            debug!(filename, error = %comma_err, "comma parse failed; retrying with semicolon");
            parse_table(bytes, b';').map_err(|semicolon_err| {
                if is_decode_failure(&semicolon_err) {
                    QualityError::LoadError {
                        detail: semicolon_err.to_string(),
                    }
                } else {
                    QualityError::ParseError {
                        detail: format!("comma: {comma_err}; semicolon: {semicolon_err}"),
                    }
                }
            })
        }
    }
}

/// Load a table from disk; the file name is validated like an upload.
pub fn load_path(path: &Path) -> Result<Table> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = std::fs::read(path).map_err(|err| QualityError::LoadError {
        detail: format!("{}: {err}", path.display()),
    })?;
    load(&bytes, &filename)
}

fn parse_table(bytes: &[u8], delimiter: u8) -> std::result::Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            cells[idx].push(cell_from_field(field));
        }
    }

    let mut table = Table::new();
    // push_column resolves duplicate headers: the later occurrence wins.
    for (header, column_cells) in headers.into_iter().zip(cells) {
        table.push_column(Column::new(header, column_cells));
    }
    Ok(table)
}

fn first_line_has_semicolon(bytes: &[u8]) -> bool {
    bytes
        .split(|b| *b == b'\n')
        .next()
        .is_some_and(|line| line.contains(&b';'))
}

fn is_decode_failure(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::Io(_)
    )
}
