use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use csvcheck_model::{
    FailureKind, Location, OutcomeStatus, RuleKind, ValidationOutcome, ValidationReport,
};

pub fn print_summary(report: &ValidationReport) {
    println!("Root: {}", report.root.display());
    println!(
        "Files: {} CSV, {} total",
        report.csv_files, report.all_files
    );
    println!("{}", summary_table(report));
    if let Some(table) = failure_table(report) {
        println!();
        println!("Failures:");
        println!("{table}");
    }
}

/// One row per rule plus a TOTAL row.
pub fn summary_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Rule"),
        header_cell("Files"),
        header_cell("Passed"),
        header_cell("Failed"),
        header_cell("Advisory"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_files = 0usize;
    for rule in &report.rules {
        total_files += rule.files_checked();
        table.add_row(vec![
            code_cell(rule.rule, rule.has_failures()),
            Cell::new(rule.rule.label()),
            Cell::new(rule.files_checked()),
            count_cell(Some(rule.pass_count()), Color::Green),
            count_cell(Some(rule.failure_count()), Color::Red),
            count_cell(Some(rule.advisory_count()), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All rules")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_files).add_attribute(Attribute::Bold),
        count_cell(Some(report.pass_count()), Color::Green).add_attribute(Attribute::Bold),
        count_cell(Some(report.failure_count()), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(report.advisory_count()), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Failing and advisory outcomes, or `None` when every outcome passed.
pub fn failure_table(report: &ValidationReport) -> Option<Table> {
    let mut rows: Vec<&ValidationOutcome> =
        report.outcomes().filter(|outcome| !outcome.is_pass()).collect();
    if rows.is_empty() {
        return None;
    }
    // failures before advisories, then by path within a rule
    rows.sort_by(|a, b| {
        status_rank(b.status)
            .cmp(&status_rank(a.status))
            .then_with(|| a.rule.cmp(&b.rule))
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Code"),
        header_cell("File"),
        header_cell("Kind"),
        header_cell("Where"),
        header_cell("Message"),
    ]);
    apply_failure_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    for outcome in rows {
        table.add_row(vec![
            status_cell(outcome.status),
            Cell::new(outcome.rule.code()),
            Cell::new(relative_path(&report.root, &outcome.path)),
            kind_cell(outcome.failure),
            location_cell(outcome.location.as_ref()),
            Cell::new(&outcome.message),
        ]);
    }
    Some(table)
}

/// Table of every rule with its code, name, and description.
pub fn rules_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Reads content"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for rule in RuleKind::all() {
        table.add_row(vec![
            Cell::new(rule.code())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rule.name()),
            if rule.reads_content() {
                Cell::new("yes")
            } else {
                dim_cell("no")
            },
            Cell::new(rule.description()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_failure_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Renders a location as `row 3, col 1 (line 4)`, omitting absent parts.
pub fn format_location(location: &Location) -> String {
    let mut parts = Vec::new();
    if let Some(row) = location.row {
        parts.push(format!("row {row}"));
    }
    if let Some(column) = location.column {
        parts.push(format!("col {column}"));
    }
    let mut text = parts.join(", ");
    if let Some(line) = location.line {
        if text.is_empty() {
            text = format!("line {line}");
        } else {
            text.push_str(&format!(" (line {line})"));
        }
    }
    text
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn status_rank(status: OutcomeStatus) -> u8 {
    match status {
        OutcomeStatus::Fail => 2,
        OutcomeStatus::Advisory => 1,
        OutcomeStatus::Pass => 0,
    }
}

fn status_cell(status: OutcomeStatus) -> Cell {
    match status {
        OutcomeStatus::Fail => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        OutcomeStatus::Advisory => Cell::new("NOTE").fg(Color::Yellow),
        OutcomeStatus::Pass => Cell::new("OK").fg(Color::Green),
    }
}

fn code_cell(rule: RuleKind, failing: bool) -> Cell {
    let cell = Cell::new(rule.code()).add_attribute(Attribute::Bold);
    if failing {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Blue)
    }
}

fn kind_cell(kind: Option<FailureKind>) -> Cell {
    match kind {
        Some(kind) => Cell::new(kind.label()),
        None => dim_cell("-"),
    }
}

fn location_cell(location: Option<&Location>) -> Cell {
    match location.map(format_location) {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
