//! Plain-text rendering of a table snapshot.

use super::screen::TableSnapshot;
use crate::engine::PageWindow;
use crate::models::{ColumnSet, Row, SortDirection, SortState};

/// Column header with a sort marker when the column is the active sort.
fn header_label(title: &str, key: &str, sort: &SortState) -> String {
    match (sort.field.as_deref(), sort.direction) {
        (Some(field), SortDirection::Asc) if field == key => format!("{title} ^"),
        (Some(field), SortDirection::Desc) if field == key => format!("{title} v"),
        _ => title.to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Render header, rows and status line.
///
/// `empty_message` is shown in place of rows when the page is empty.
pub fn render_table<R: Row>(
    snapshot: &TableSnapshot<'_, R>,
    columns: &ColumnSet<R>,
    sort: &SortState,
    empty_message: &str,
) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|c| header_label(&c.title, &c.key, sort))
        .collect();
    let cells: Vec<Vec<String>> = snapshot
        .view
        .rows
        .iter()
        .map(|record| columns.iter().map(|c| c.display(*record)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let join = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(text, &w)| pad(text, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![join(&headers)];
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );

    if cells.is_empty() {
        lines.push(empty_message.to_string());
    } else {
        lines.extend(cells.iter().map(|row| join(row)));
    }

    lines.push(String::new());
    lines.push(status_line(snapshot));
    lines.join("\n")
}

/// "Showing 4-6 of 7 records", noting the unfiltered total when filtered.
pub fn status_line<R>(snapshot: &TableSnapshot<'_, R>) -> String {
    let view = &snapshot.view;
    let mut line = format!(
        "Showing {}-{} of {} records",
        view.first_row_number(),
        view.last_row_number(),
        view.filtered_count
    );
    if view.filtered_count != view.total_count {
        line.push_str(&format!(" (filtered from {})", view.total_count));
    }
    if view.has_pagination() {
        line.push_str(&format!(" | Page {} of {}", view.effective_page, view.total_pages));
    }
    line
}

/// Render paginator controls, e.g. `< 1 ... 8 9 [10] 11 12 ... 20 >`.
///
/// Returns `None` when there is only one page.
pub fn render_pager(window: &PageWindow) -> Option<String> {
    if window.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    if window.has_prev() {
        parts.push("<".to_string());
    }
    if window.show_first {
        parts.push("1".to_string());
    }
    if window.show_leading_ellipsis {
        parts.push("...".to_string());
    }
    for &page in &window.pages {
        if page == window.current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_trailing_ellipsis {
        parts.push("...".to_string());
    }
    if window.show_last {
        parts.push(window.total_pages.to_string());
    }
    if window.has_next() {
        parts.push(">".to_string());
    }
    Some(parts.join(" "))
}
