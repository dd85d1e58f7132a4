//! Output formatting.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use kvk_lib::model::ColumnDescriptor;
use kvk_lib::model::Row;
use kvk_lib::nav::BackTarget;
use kvk_lib::nav::Breadcrumb;
use kvk_lib::nav::RouteDescriptor;
use kvk_lib::nav::format_trail;
use kvk_lib::table::Direction;
use kvk_lib::table::SortState;
use kvk_lib::table::TableView;
use serde::Serialize;

/// Maximum characters shown per cell.
const CELL_MAX_LEN: usize = 40;

/// JSON output for `kvk table`.
#[derive(Serialize)]
pub struct JsonTable<'a> {
    pub rows: &'a [&'a Row],
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// JSON output for `kvk nav`.
#[derive(Serialize)]
pub struct JsonNav<'a> {
    pub route: Option<&'a RouteDescriptor>,
    pub breadcrumbs: &'a [Breadcrumb],
    pub tabs: Vec<&'a str>,
    pub back: &'a BackTarget,
}

/// Formats a table view as JSON.
pub fn table_json(view: &TableView<'_>) -> String {
    let output = JsonTable {
        rows: &view.rows,
        total_filtered: view.total_filtered,
        total_pages: view.total_pages,
        current_page: view.current_page,
        page_size: view.page_size,
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a table view as aligned text with a pager footer.
pub fn table_human(view: &TableView<'_>, columns: &[ColumnDescriptor], sort: Option<&SortState>) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|c| match sort {
            Some(s) if s.key == c.key => {
                let arrow = match s.direction {
                    Direction::Asc => "^",
                    Direction::Desc => "v",
                };
                format!("{} {}", c.label, arrow)
            }
            _ => c.label.clone(),
        })
        .collect();
    let cells: Vec<Vec<String>> = view
        .cells(columns)
        .into_iter()
        .map(|row| row.into_iter().map(|c| truncate_text(&c, CELL_MAX_LEN)).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
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
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    if cells.is_empty() {
        out.push_str("(no matching rows)\n");
    }
    for row in &cells {
        out.push_str(&format_line(row, &widths));
        out.push('\n');
    }
    out.push_str(&format!(
        "\npage {} of {} | {} matching rows | {} per page",
        view.current_page, view.total_pages, view.total_filtered, view.page_size
    ));
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

/// Formats the navigation chrome for a path.
pub fn nav_human(
    route: Option<&RouteDescriptor>,
    breadcrumbs: &[Breadcrumb],
    tabs: &[&RouteDescriptor],
    back: &BackTarget,
    current_path: &str,
) -> String {
    let Some(route) = route else {
        return format!("no route\nback: {}", back_label(back));
    };

    let mut out = format!("{}\n", route.title);
    if let Some(description) = &route.description {
        out.push_str(&format!("  {}\n", description));
    }
    out.push_str(&format!("\ncrumbs: {}\n", format_trail(breadcrumbs)));
    if !tabs.is_empty() {
        let labels: Vec<String> = tabs
            .iter()
            .map(|t| {
                if t.path == current_path {
                    format!("[{}]", t.title)
                } else {
                    t.title.clone()
                }
            })
            .collect();
        out.push_str(&format!("tabs:   {}\n", labels.join("  ")));
    }
    out.push_str(&format!("back:   {}", back_label(back)));
    out
}

/// Formats a route table, one route per line.
pub fn routes_human(routes: &[RouteDescriptor]) -> String {
    let width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    routes
        .iter()
        .map(|r| format!("{:<width$}  {} ({})", r.path, r.title, r.category.label(), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn back_label(back: &BackTarget) -> &str {
    match back {
        BackTarget::Path(p) => p,
        BackTarget::History => "(history)",
    }
}

/// Truncates text to max length, adding ellipsis if needed.
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
