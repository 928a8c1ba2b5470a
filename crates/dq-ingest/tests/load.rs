//! Integration tests for upload validation and delimiter-fallback loading.

use dq_ingest::{load, load_path, validate_upload};
use dq_model::QualityError;

#[test]
fn comma_and_semicolon_inputs_load_identically() {
    let comma = load(b"id,name,score\n1,alice,10\n2,bob,\n", "a.csv").unwrap();
    let semicolon = load(b"id;name;score\n1;alice;10\n2;bob;\n", "b.csv").unwrap();

    assert_eq!(
        comma.column_names().collect::<Vec<_>>(),
        semicolon.column_names().collect::<Vec<_>>()
    );
    for name in comma.column_names() {
        assert_eq!(
            comma.column(name).unwrap().cells,
            semicolon.column(name).unwrap().cells,
            "column {name} differs between delimiters"
        );
    }
}

#[test]
fn structural_comma_failure_falls_back_to_semicolon() {
    // Commas appear in only some records, so the comma pass sees unequal
    // field counts; the semicolon pass parses cleanly.
    let table = load(b"a;b\n1;2\nx,y;3\n", "data.csv").unwrap();
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column("a").unwrap().cells[1],
        dq_model::CellValue::Text("x,y".to_string())
    );
}

#[test]
fn failure_under_both_delimiters_is_a_parse_error() {
    // Ragged under comma (3 fields vs 2) and under semicolon (2 vs 1).
    let err = load(b"a,b\n1,2,3\nx;y\n", "data.csv").unwrap_err();
    assert!(matches!(err, QualityError::ParseError { .. }), "got {err:?}");
}

#[test]
fn invalid_utf8_is_a_load_error_not_retried() {
    let err = load(b"a,b\n\xff\xfe,2\n", "data.csv").unwrap_err();
    assert!(matches!(err, QualityError::LoadError { .. }), "got {err:?}");
}

#[test]
fn empty_input_is_rejected_before_parsing() {
    let err = load(b"", "data.csv").unwrap_err();
    assert!(matches!(err, QualityError::EmptyFile));

    let err = validate_upload("data.csv", b"").unwrap_err();
    assert!(matches!(err, QualityError::EmptyFile));
}

#[test]
fn unrecognized_extension_is_rejected() {
    for filename in ["data.xlsx", "data", "data.csv.bak"] {
        let err = validate_upload(filename, b"a,b\n").unwrap_err();
        assert!(
            matches!(err, QualityError::InvalidFileType { .. }),
            "{filename} should be rejected"
        );
    }
    validate_upload("DATA.CSV", b"a,b\n").unwrap();
}

#[test]
fn load_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.csv");
    std::fs::write(&path, "name,score\nalice,10\nbob,9\n").unwrap();

    let table = load_path(&path).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["name", "score"]
    );
}

#[test]
fn load_path_missing_file_is_a_load_error() {
    let err = load_path(std::path::Path::new("/nonexistent/input.csv")).unwrap_err();
    assert!(matches!(err, QualityError::LoadError { .. }));
}
