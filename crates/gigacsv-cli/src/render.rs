//! Terminal rendering of grids and row counts.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gigacsv_core::Grid;

/// Groups digits in threes from the right with `_`: `1234567` -> `1_234_567`.
pub fn format_row_count(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(ch);
    }
    grouped
}

/// Status line shown under the grid.
pub fn row_label(count: usize) -> String {
    format!("Total Rows: {}", format_row_count(count))
}

/// Limits applied when turning a grid into a table.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub max_rows: usize,
    pub max_cell_width: usize,
}

/// Builds a table of the first `max_rows` rows with a leading row-index column.
pub fn grid_table(grid: &Grid, options: RenderOptions) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(grid.header().iter().map(String::as_str).map(header_cell));
    table.set_header(header);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for (index, row) in grid.rows().iter().take(options.max_rows).enumerate() {
        let mut cells = vec![Cell::new(index).fg(Color::DarkGrey)];
        cells.extend(
            row.iter()
                .map(|value| Cell::new(truncate_cell(value, options.max_cell_width))),
        );
        table.add_row(cells);
    }

    let hidden = grid.row_count().saturating_sub(options.max_rows);
    if hidden > 0 {
        table.add_row(vec![
            Cell::new("…").fg(Color::DarkGrey),
            Cell::new(format!("{} more rows", format_row_count(hidden))).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// Cuts `value` to `max_width` characters, marking the cut with `…`.
///
/// Line breaks are shown as `⏎` so every cell stays on one line.
pub fn truncate_cell(value: &str, max_width: usize) -> String {
    let flat = value.replace("\r\n", "⏎").replace(['\n', '\r'], "⏎");
    if flat.chars().count() <= max_width {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
