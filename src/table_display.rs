use crate::data::table::Table;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};
use crossterm::style::Stylize;

/// Render the visible rows, in display order, with decorated headers
pub fn render_table(table: &Table) -> ComfyTable {
    let mut output = ComfyTable::new();
    output.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = table
        .header_labels()
        .into_iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect();
    output.set_header(headers);

    for row in table.visible_rows() {
        output.add_row(row.cells().to_vec());
    }

    output
}

pub fn display_results(table: &Table) {
    if table.visible_count() == 0 {
        println!("{}", "No rows match.".yellow());
        return;
    }

    println!("{}", render_table(table));

    let summary = match table.sort_state().attributes() {
        Some([(_, col), (_, dir)]) => format!(
            "{} of {} rows shown, sorted by column {} ({})",
            table.visible_count(),
            table.row_count(),
            col,
            dir
        ),
        None => format!("{} of {} rows shown", table.visible_count(), table.row_count()),
    };
    println!("\n{}", summary.green());
}
