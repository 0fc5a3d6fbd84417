//! Markdown-style text rendering of a [`TableData`]

use crate::table::TableData;
use console::measure_text_width;

/// Render the table as lines of text: header, separator, then one line per row.
///
/// Headers are centred and cells left-aligned; short rows are padded with
/// empty cells.
///
/// # Examples
///
/// ```
/// use junit_reporter::render::render_table;
/// use junit_reporter::table::TableData;
///
/// let table = TableData {
///     columns: vec!["Name".into(), "1.0".into()],
///     rows: vec![vec!["Parser:Read".into(), "12ms".into()]],
/// };
/// assert_eq!(
///     render_table(&table),
///     vec![
///         "|    Name     | 1.0  |",
///         "|-------------|------|",
///         "| Parser:Read | 12ms |",
///     ]
/// );
/// ```
pub fn render_table(table: &TableData) -> Vec<String> {
    let widths = column_widths(table);

    let mut lines = Vec::with_capacity(table.rows.len() + 2);

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| centre(name, *width))
        .collect();
    lines.push(join_cells(&header));

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    lines.push(format!("|{}|", separator.join("|")));

    for row in &table.rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| pad_right(row.get(i).map(String::as_str).unwrap_or(""), *width))
            .collect();
        lines.push(join_cells(&cells));
    }

    lines
}

/// Render the table as one string, lines joined with newlines.
pub fn render_to_string(table: &TableData) -> String {
    render_table(table).join("\n")
}

fn column_widths(table: &TableData) -> Vec<usize> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| measure_text_width(c)).collect();
    for row in &table.rows {
        for (i, value) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(value));
        }
    }
    widths
}

fn join_cells(cells: &[String]) -> String {
    let padded: Vec<String> = cells.iter().map(|c| format!(" {} ", c)).collect();
    format!("|{}|", padded.join("|"))
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn centre(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    let left = fill / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
}
