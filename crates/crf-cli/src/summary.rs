use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crf_extract::ExtractionReport;

use crate::types::BatchResult;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Per-field outcome table for a single document, written to stderr.
pub fn print_report(report: &ExtractionReport, values: usize) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Label"), header_cell("Outcome")]);
    apply_table_style(&mut table);
    for label in &report.found {
        table.add_row(vec![Cell::new(label), outcome_cell("found", Color::Green)]);
    }
    for label in &report.blank {
        table.add_row(vec![Cell::new(label), outcome_cell("blank", Color::Yellow)]);
    }
    for label in &report.missing {
        table.add_row(vec![Cell::new(label), outcome_cell("missing", Color::DarkGrey)]);
    }
    for label in &report.reserved {
        table.add_row(vec![Cell::new(label), outcome_cell("context", Color::Cyan)]);
    }
    eprintln!("{table}");
    eprintln!(
        "Extracted {} of {} fields, {values} values written (form variant: {})",
        report.extracted_count(),
        report.searched_count(),
        report.form_variant
    );
}

pub fn print_batch_summary(result: &BatchResult) {
    println!("Form: {}", result.form);
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Subject"),
        header_cell("Found"),
        header_cell("Blank"),
        header_cell("Searched"),
        header_cell("Values"),
        header_cell("Variant"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    let mut total_found = 0usize;
    for summary in &result.documents {
        total_found += summary.found;
        table.add_row(vec![
            Cell::new(&summary.subject_id).add_attribute(Attribute::Bold),
            Cell::new(summary.found).set_alignment(CellAlignment::Right),
            Cell::new(summary.blank).set_alignment(CellAlignment::Right),
            Cell::new(summary.searched).set_alignment(CellAlignment::Right),
            Cell::new(summary.values).set_alignment(CellAlignment::Right),
            Cell::new(if summary.form_variant { "yes" } else { "no" })
                .set_alignment(CellAlignment::Center),
            Cell::new(summary.output.display()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_found)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(format!("{} documents", result.documents.len())),
    ]);
    println!("{table}");
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn outcome_cell(text: &str, color: Color) -> Cell {
    Cell::new(text).fg(color)
}
