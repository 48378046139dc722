//! Plain-text rendering of a grid page and its pagination control

use dg_core::{ColumnSet, PageToken, SortDirection};
use dg_data::{GridConfig, GridSnapshot};
use serde_json::Value;

/// Shorten `value` to `max_width` characters, marking the cut with `...`.
/// A width of 0 disables truncation.
pub fn truncate(value: &str, max_width: usize) -> String {
    if max_width == 0 || value.chars().count() <= max_width {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_width).collect();
    format!("{}...", kept)
}

fn token_label(token: &PageToken) -> String {
    match token {
        PageToken::First { .. } => "«".to_string(),
        PageToken::Previous { .. } => "‹".to_string(),
        PageToken::Page { number, current: true } => format!("[{}]", number),
        PageToken::Page { number, .. } => number.to_string(),
        PageToken::Ellipsis => "…".to_string(),
        PageToken::Next { .. } => "›".to_string(),
        PageToken::Last { .. } => "»".to_string(),
    }
}

/// One-line pagination control, e.g. `« ‹ [1] 2 … 20 › »`
pub fn render_tokens(tokens: &[PageToken]) -> String {
    tokens.iter().map(token_label).collect::<Vec<_>>().join(" ")
}

/// Row count line under the table
pub fn render_summary(snapshot: &GridSnapshot<Value>) -> String {
    let mut summary = format!("{} of {} rows", snapshot.rows.len(), snapshot.filtered_rows);
    if snapshot.filtered_rows < snapshot.total_rows {
        summary.push_str(&format!(" (filtered from {})", snapshot.total_rows));
    }
    summary
}

/// Table of the snapshot rows followed by the summary and the token bar
pub fn render_grid(
    snapshot: &GridSnapshot<Value>,
    columns: &ColumnSet<Value>,
    config: &GridConfig,
) -> String {
    let state = &snapshot.state;

    let mut headers: Vec<String> = columns
        .iter()
        .map(|column| match state.sort_direction_for(&column.key) {
            Some(SortDirection::Ascending) => format!("{} ▲", column.label),
            Some(SortDirection::Descending) => format!("{} ▼", column.label),
            None => column.label.clone(),
        })
        .collect();

    let mut rows: Vec<Vec<String>> = snapshot
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| truncate(&column.display(record), config.max_cell_width))
                .collect()
        })
        .collect();

    if config.show_row_numbers {
        let offset = if state.is_paged() {
            (state.page - 1).saturating_mul(state.page_size)
        } else {
            0
        };
        headers.insert(0, "#".to_string());
        for (idx, row) in rows.iter_mut().enumerate() {
            row.insert(0, (offset + idx + 1).to_string());
        }
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(&headers, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &rows {
        out.push_str(&format_line(row, &widths));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_summary(snapshot));
    out.push('\n');
    if state.is_paged() {
        out.push_str(&render_tokens(&snapshot.tokens));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{compute_range, ColumnDescriptor, RangeOptions, SortState, ViewState};
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("a long value", 6), "a long...");
        assert_eq!(truncate("Zürich-Örlikon", 6), "Zürich...");
        assert_eq!(truncate("unbounded", 0), "unbounded");
    }

    #[test]
    fn test_render_tokens() {
        let tokens = compute_range(&RangeOptions::new(1, 20));
        assert_eq!(render_tokens(&tokens), "« ‹ [1] 2 … 20 › »");

        let tokens = compute_range(&RangeOptions::new(10, 20).first_last(false));
        assert_eq!(render_tokens(&tokens), "‹ 1 … 9 [10] 11 … 20 ›");
    }

    #[test]
    fn test_render_grid() {
        let columns: ColumnSet<Value> = vec![
            ColumnDescriptor::new("name").with_label("Name"),
            ColumnDescriptor::new("city"),
        ]
        .into();
        let state = ViewState::paged(2)
            .with_sort(Some(SortState::descending("name")))
            .with_page(2);
        let snapshot = GridSnapshot {
            state,
            rows: vec![
                json!({ "name": "Grace", "city": "Arlington" }),
                json!({ "name": "Ada", "city": null }),
            ],
            total_rows: 5,
            filtered_rows: 4,
            page_count: 2,
            tokens: compute_range(&RangeOptions::new(2, 2)),
        };
        let config = GridConfig {
            max_cell_width: 6,
            ..GridConfig::default()
        };

        let rendered = render_grid(&snapshot, &columns, &config);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "# | Name ▼ | city");
        assert_eq!(lines[1], "--+--------+----------");
        assert_eq!(lines[2], "3 | Grace  | Arling...");
        assert_eq!(lines[3], "4 | Ada");
        assert_eq!(lines[5], "2 of 4 rows (filtered from 5)");
        assert_eq!(lines[6], "« ‹ 1 [2] › »");
    }

    #[test]
    fn test_render_without_row_numbers_or_paging() {
        let columns: ColumnSet<Value> = vec![ColumnDescriptor::new("id")].into();
        let snapshot = GridSnapshot {
            state: ViewState::new(),
            rows: vec![json!({ "id": 1 }), json!({ "id": 22 })],
            total_rows: 2,
            filtered_rows: 2,
            page_count: 1,
            tokens: compute_range(&RangeOptions::new(1, 1)),
        };
        let config = GridConfig {
            show_row_numbers: false,
            ..GridConfig::default()
        };

        let rendered = render_grid(&snapshot, &columns, &config);
        assert_eq!(rendered, "id\n--\n1\n22\n\n2 of 2 rows\n");
    }
}
