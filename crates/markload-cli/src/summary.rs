use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::ImportOutcome;

pub fn print_import_summary(outcome: &ImportOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Syntax errors"),
        header_cell("Submitted"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.rows_parsed),
        count_cell(outcome.partition.valid_count(), Color::Green),
        count_cell(outcome.partition.invalid_count(), Color::Red),
        count_cell(outcome.syntax_errors.len(), Color::Red),
        submitted_cell(outcome),
    ]);
    println!("{table}");

    if !outcome.syntax_errors.is_empty() {
        println!();
        println!("Syntax errors:");
        for error in &outcome.syntax_errors {
            println!("- {error}");
        }
    }

    print_issue_table(outcome);

    if let Some(path) = &outcome.error_report {
        println!();
        println!("Error report: {}", path.display());
    }
}

fn print_issue_table(outcome: &ImportOutcome) {
    if outcome.partition.invalid.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Subject"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in &outcome.partition.invalid {
        table.add_row(vec![
            Cell::new(error.row),
            Cell::new(&error.subject),
            Cell::new(error.errors.join("; ")),
        ]);
    }
    println!();
    println!("Invalid rows:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn submitted_cell(outcome: &ImportOutcome) -> Cell {
    if outcome.dry_run {
        return dim_cell("dry run");
    }
    match &outcome.committed {
        Some(summary) => Cell::new(summary.rows_submitted)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
