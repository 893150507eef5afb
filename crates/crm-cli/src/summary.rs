use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crm_model::{
    AdjustmentKind, FieldAdjustment, FieldRejection, ImportReport, RejectionReason, SkippedRow,
};

/// Rows listed before the skipped-row, rejection and adjustment tables are truncated.
const MAX_LISTED_ROWS: usize = 50;
/// Longest cell value echoed back in the rejection table.
const MAX_VALUE_CHARS: usize = 40;

pub fn print_summary(report: &ImportReport) {
    println!("{}", report.headline());
    println!("{}", summary_table(report));
    if !report.skipped.is_empty() {
        println!();
        println!("Skipped rows:");
        println!("{}", skipped_table(&report.skipped));
    }
    if !report.rejections.is_empty() {
        println!();
        println!("Nulled values:");
        println!("{}", rejection_table(&report.rejections));
    }
    if !report.adjustments.is_empty() {
        println!();
        println!("Adjusted values:");
        println!("{}", adjustment_table(&report.adjustments));
    }
    if !report.unmapped_headers.is_empty() {
        eprintln!("Unmapped headers (dropped):");
        for header in &report.unmapped_headers {
            eprintln!("- {header}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn summary_table(report: &ImportReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("File"),
        header_cell("Stage"),
        header_cell("Processed"),
        header_cell("Imported"),
        header_cell("Skipped"),
        header_cell("Nulled"),
        header_cell("Adjusted"),
    ]);
    apply_report_table_style(&mut table);
    for index in 3..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let stage = if report.dry_run {
        Cell::new(format!("{} (dry run)", report.stage)).fg(Color::Yellow)
    } else {
        Cell::new(report.stage).fg(Color::Green)
    };
    table.add_row(vec![
        Cell::new(report.entity)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&report.file_name),
        stage,
        Cell::new(report.rows_processed),
        Cell::new(report.rows_imported).add_attribute(Attribute::Bold),
        count_cell(report.rows_skipped, Color::Yellow),
        count_cell(report.rejections.len(), Color::Yellow),
        count_cell(report.replaced_values().count(), Color::Yellow),
    ]);
    table
}

fn skipped_table(skipped: &[SkippedRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Row"), header_cell("Reasons")]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in skipped.iter().take(MAX_LISTED_ROWS) {
        table.add_row(vec![
            Cell::new(row.row_number),
            Cell::new(row.reasons.join("; ")).fg(Color::Yellow),
        ]);
    }
    add_truncation_row(&mut table, skipped.len(), 2);
    table
}

fn rejection_table(rejections: &[FieldRejection]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Reason"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for rejection in rejections.iter().take(MAX_LISTED_ROWS) {
        table.add_row(vec![
            Cell::new(rejection.row_number),
            Cell::new(&rejection.field),
            Cell::new(truncate(&rejection.value)),
            reason_cell(rejection.reason),
        ]);
    }
    add_truncation_row(&mut table, rejections.len(), 4);
    table
}

fn adjustment_table(adjustments: &[FieldAdjustment]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Change"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for adjustment in adjustments.iter().take(MAX_LISTED_ROWS) {
        let value = match &adjustment.from {
            Some(from) => format!("{} → {}", truncate(from), truncate(&adjustment.to)),
            None => truncate(&adjustment.to),
        };
        table.add_row(vec![
            Cell::new(adjustment.row_number),
            Cell::new(&adjustment.field),
            Cell::new(value),
            kind_cell(adjustment.kind),
        ]);
    }
    add_truncation_row(&mut table, adjustments.len(), 4);
    table
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() == 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
        ]);
    }
}

fn add_truncation_row(table: &mut Table, total: usize, columns: usize) {
    if total <= MAX_LISTED_ROWS {
        return;
    }
    let mut row = vec![dim_cell("...")];
    row.push(dim_cell(format!("{} more", total - MAX_LISTED_ROWS)));
    row.resize_with(columns, || dim_cell(""));
    table.add_row(row);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn reason_cell(reason: RejectionReason) -> Cell {
    match reason {
        RejectionReason::Heuristic(_) => Cell::new(reason).fg(Color::Yellow),
        RejectionReason::Unparseable => Cell::new(reason).fg(Color::Red),
        RejectionReason::EmptyAfterSanitize => dim_cell(reason),
    }
}

fn kind_cell(kind: AdjustmentKind) -> Cell {
    if kind.replaces_value() {
        Cell::new(kind).fg(Color::Yellow)
    } else {
        dim_cell(kind)
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
    Cell::new(value).fg(Color::DarkGrey)
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_VALUE_CHARS {
        return value.to_string();
    }
    let head: String = value.chars().take(MAX_VALUE_CHARS - 1).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use crm_model::{EntityType, HeuristicRule};

    use super::*;

    fn rejection(row_number: usize) -> FieldRejection {
        FieldRejection {
            row_number,
            field: "end_date".to_string(),
            value: "WISDM Support Services".to_string(),
            reason: RejectionReason::Heuristic(HeuristicRule::LongText),
        }
    }

    #[test]
    fn long_lists_are_truncated() {
        let rejections: Vec<_> = (1..=60).map(rejection).collect();
        assert_eq!(rejection_table(&rejections).row_count(), MAX_LISTED_ROWS + 1);
        assert_eq!(rejection_table(&rejections[..3]).row_count(), 3);
    }

    #[test]
    fn long_values_are_shortened() {
        let value = "x".repeat(100);
        let shortened = truncate(&value);
        assert_eq!(shortened.chars().count(), MAX_VALUE_CHARS);
        assert!(shortened.ends_with('…'));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn adjustments_are_listed() {
        let mut report = ImportReport::new(EntityType::Deals, "deals.csv");
        report.adjustments = vec![
            FieldAdjustment {
                row_number: 3,
                field: "stage".to_string(),
                kind: AdjustmentKind::EnumSnapped,
                from: Some("won!!".to_string()),
                to: "prospect".to_string(),
            },
            FieldAdjustment {
                row_number: 3,
                field: "name".to_string(),
                kind: AdjustmentKind::Defaulted,
                from: None,
                to: "Imported Deal".to_string(),
            },
        ];
        let table = adjustment_table(&report.adjustments).to_string();
        assert!(table.contains("won!! → prospect"));
        assert!(table.contains("snapped to default"));
        assert!(table.contains("Imported Deal"));
        assert_eq!(summary_table(&report).row_count(), 1);
    }

    #[test]
    fn summary_is_one_row() {
        let report = ImportReport::new(EntityType::Deals, "deals.csv");
        assert_eq!(summary_table(&report).row_count(), 1);
        assert_eq!(skipped_table(&report.skipped).row_count(), 0);
    }
}
