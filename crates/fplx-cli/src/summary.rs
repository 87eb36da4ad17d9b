use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fplx_model::{Finding, Severity, TableKind};
use fplx_report::{Outcome, Report};

/// Render the report as terminal tables: per-table counts, then findings.
///
/// `styled` controls ANSI styling; file output passes `false`.
pub fn render_table(report: &Report, styled: bool) -> String {
    let mut out = String::new();
    out.push_str(&totals_table(report, styled).to_string());
    out.push('\n');
    if !report.findings.is_empty() {
        out.push('\n');
        out.push_str("Findings:\n");
        out.push_str(&findings_table(report, styled).to_string());
        out.push('\n');
    }
    out.push_str(&report.summary_line());
    out.push('\n');
    out
}

fn totals_table(report: &Report, styled: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_summary_table_style(&mut table, styled);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for kind in TableKind::ALL {
        let findings: Vec<&Finding> = report.findings_for(kind).collect();
        let (errors, warnings, info) = severity_split(&findings);
        table.add_row(vec![
            Cell::new(kind)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
            count_cell(info, Color::Cyan),
        ]);
    }
    let outcome_color = match report.outcome() {
        Outcome::Pass => Color::Green,
        Outcome::Fail => Color::Red,
    };
    table.add_row(vec![
        Cell::new(report.outcome())
            .fg(outcome_color)
            .add_attribute(Attribute::Bold),
        count_cell(report.totals.errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.totals.warnings, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(report.totals.info, Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table
}

fn findings_table(report: &Report, styled: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Line"),
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_findings_table_style(&mut table, styled);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for finding in &report.findings {
        table.add_row(vec![
            Cell::new(finding.table),
            finding.line.map_or_else(|| dim_cell("-"), Cell::new),
            severity_cell(finding.severity),
            Cell::new(finding.kind.as_str()),
            Cell::new(&finding.message),
        ]);
    }
    table
}

fn severity_split(findings: &[&Finding]) -> (usize, usize, usize) {
    findings
        .iter()
        .fold((0, 0, 0), |(errors, warnings, info), finding| {
            match finding.severity {
                Severity::Error => (errors + 1, warnings, info),
                Severity::Warning => (errors, warnings + 1, info),
                Severity::Info => (errors, warnings, info + 1),
            }
        })
}

fn apply_summary_table_style(table: &mut Table, styled: bool) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !styled {
        table.force_no_tty();
    }
}

fn apply_findings_table_style(table: &mut Table, styled: bool) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::UpperBoundary(Width::Fixed(9)),
        ColumnConstraint::UpperBoundary(Width::Fixed(32)),
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
    ]);
    if !styled {
        table.force_no_tty();
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Cyan),
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
