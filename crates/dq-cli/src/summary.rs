use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_cli::report::AssessmentReport;

pub fn print_report(report: &AssessmentReport) {
    println!("Source: {}", report.source);
    println!("Rows: {}  Columns: {}", report.rows, report.columns);

    let mut table = Table::new();
    let mut header = vec![
        header_cell("Column"),
        header_cell("Completeness %"),
        header_cell("Uniqueness %"),
    ];
    if report.timeliness.is_some() {
        header.push(header_cell("Timeliness %"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for (column, complete) in report.completeness.iter() {
        let unique = report.uniqueness.get(column);
        let mut row = vec![
            Cell::new(column),
            percent_cell(Some(complete)),
            percent_cell(unique),
        ];
        if let Some(timeliness) = &report.timeliness {
            row.push(percent_cell(timeliness.get(column)));
        }
        table.add_row(row);
    }
    println!("{table}");

    if let Some(validity) = &report.validity {
        println!(
            "Validity [{}] on {}: {:.2}%",
            validity.kind, validity.column, validity.percent
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn percent_cell(percent: Option<f64>) -> Cell {
    match percent {
        Some(percent) => Cell::new(format!("{percent:.2}")),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
