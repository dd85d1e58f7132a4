//! Per-screen table state.

use log::trace;
use serde::Deserialize;
use serde::Serialize;

use super::filter::apply_filter;
use super::page::DEFAULT_PAGE_SIZE;
use super::page::PageState;
use super::page::paginate;
use super::page::total_pages;
use super::sort::SortState;
use super::sort::apply_sort;
use crate::model::ColumnDescriptor;
use crate::model::Row;
use crate::model::RowKey;

/// How the engine treats a current page that lies past the last page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageClamp {
    /// Show the nearest existing page (stored page number is left as is).
    #[default]
    Clamp,
    /// Show an empty page past the end.
    Preserve,
}

/// Table engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Out-of-range page handling.
    pub page_clamp: PageClamp,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_clamp: PageClamp::default(),
        }
    }
}

/// The computed view of a table: the rows to render plus pager metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// Rows on the current page, filtered and sorted.
    pub rows: Vec<&'a Row>,
    /// Number of rows matching the search, across all pages.
    pub total_filtered: usize,
    /// Number of pages for the filtered rows (0 when nothing matches).
    pub total_pages: usize,
    /// Page the rows were taken from.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl TableView<'_> {
    /// Returns `true` if there is a page before the current one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns the render key of each visible row.
    pub fn keys(&self) -> Vec<RowKey> {
        let offset = self.current_page.saturating_sub(1) * self.page_size;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.key(offset + i))
            .collect()
    }

    /// Renders the visible rows as text cells, one `Vec` per row in column order.
    pub fn cells(&self, columns: &[ColumnDescriptor]) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| columns.iter().map(|c| c.cell(row)).collect())
            .collect()
    }
}

/// Search, sort and pagination state for one table screen.
///
/// The engine owns the full candidate row set (client-side pagination) and
/// the column metadata. Mutators change one slice of state; [`view`]
/// recomputes the visible rows from scratch.
///
/// # Example
///
/// ```
/// use kvk_lib::model::{ColumnDescriptor, Row};
/// use kvk_lib::table::TableEngine;
///
/// let rows = vec![
///     Row::new().set("id", 1).set("name", "Banka").set("qty", 5),
///     Row::new().set("id", 2).set("name", "Araria").set("qty", 12),
///     Row::new().set("id", 3).set("name", "Arwal").set("qty", 3),
/// ];
/// let columns = vec![
///     ColumnDescriptor::new("name", "District"),
///     ColumnDescriptor::new("qty", "Quantity").sortable(),
/// ];
///
/// let mut table = TableEngine::new(rows, columns);
/// table.toggle_sort("qty");
/// let view = table.view();
/// assert_eq!(view.rows[0].value_or_null("name").to_string(), "Arwal");
/// ```
///
/// [`view`]: TableEngine::view
#[derive(Debug, Clone)]
pub struct TableEngine {
    rows: Vec<Row>,
    columns: Vec<ColumnDescriptor>,
    search: String,
    sort: Option<SortState>,
    page: PageState,
    clamp: PageClamp,
}

impl TableEngine {
    /// Creates an engine with the default configuration.
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnDescriptor>) -> Self {
        Self::with_config(rows, columns, TableConfig::default())
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(rows: Vec<Row>, columns: Vec<ColumnDescriptor>, config: TableConfig) -> Self {
        Self {
            rows,
            columns,
            search: String::new(),
            sort: None,
            page: PageState::new(config.page_size),
            clamp: config.page_clamp,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns all rows, unfiltered and in input order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column descriptors in display order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns the current search text.
    pub fn search_query(&self) -> &str {
        &self.search
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Returns the stored page state.
    pub fn page(&self) -> PageState {
        self.page
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Replaces the search text and returns to page 1.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page.current_page = 1;
    }

    /// Toggles sorting on `key` as a header click would.
    ///
    /// A new key sorts ascending; the active key flips direction. Keys that
    /// name no column, or a column not marked sortable, are ignored and
    /// `false` is returned.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
        if !sortable {
            trace!("ignoring sort toggle on non-sortable key {:?}", key);
            return false;
        }
        self.sort = Some(SortState::toggle(self.sort.as_ref(), key));
        true
    }

    /// Sets the current page. No clamping is applied to the stored value.
    pub fn set_page(&mut self, page: usize) {
        self.page.current_page = page;
    }

    /// Sets the page size (at least 1). The current page is kept.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.page_size = page_size.max(1);
    }

    /// Replaces the row set. Search, sort and page are kept.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Clears search and sort and returns to page 1.
    pub fn reset(&mut self) {
        self.search.clear();
        self.sort = None;
        self.page.current_page = 1;
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Returns the filtered and sorted rows across all pages.
    pub fn filtered_sorted(&self) -> Vec<&Row> {
        apply_sort(apply_filter(&self.rows, &self.search), self.sort.as_ref())
    }

    /// Computes the rows visible on the current page.
    pub fn view(&self) -> TableView<'_> {
        let matched = self.filtered_sorted();
        let page_size = self.page.page_size;
        let pages = total_pages(matched.len(), page_size);
        let current_page = match self.clamp {
            PageClamp::Clamp => self.page.current_page.clamp(1, pages.max(1)),
            PageClamp::Preserve => self.page.current_page,
        };
        let (slice, _) = paginate(&matched, current_page, page_size);
        trace!(
            "table view: {} of {} rows matched, page {}/{}",
            matched.len(),
            self.rows.len(),
            current_page,
            pages
        );
        TableView {
            rows: slice.to_vec(),
            total_filtered: matched.len(),
            total_pages: pages,
            current_page,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Direction;

    fn numbered(n: i64) -> Vec<Row> {
        (1..=n).map(|i| Row::new().set("id", i).set("name", format!("row {}", i))).collect()
    }

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID").sortable(),
            ColumnDescriptor::new("name", "Name"),
        ]
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = TableEngine::new(numbered(25), columns());
        table.set_page(3);
        table.set_search_query("row");
        assert_eq!(table.page().current_page, 1);
        table.set_page(2);
        table.set_search_query("");
        assert_eq!(table.page().current_page, 1);
    }

    #[test]
    fn test_toggle_ignores_non_sortable_and_unknown() {
        let mut table = TableEngine::new(numbered(3), columns());
        assert!(!table.toggle_sort("name"));
        assert!(!table.toggle_sort("missing"));
        assert!(table.sort().is_none());
        assert!(table.toggle_sort("id"));
        assert_eq!(table.sort().map(|s| s.direction), Some(Direction::Asc));
    }

    #[test]
    fn test_clamp_shows_last_page_after_shrink() {
        let mut table = TableEngine::new(numbered(25), columns());
        table.set_page(3);
        table.set_rows(numbered(12));
        let view = table.view();
        assert_eq!(view.current_page, 2);
        assert_eq!(view.rows.len(), 2);
        // stored value is untouched
        assert_eq!(table.page().current_page, 3);
    }

    #[test]
    fn test_preserve_shows_empty_page_after_shrink() {
        let config = TableConfig {
            page_clamp: PageClamp::Preserve,
            ..TableConfig::default()
        };
        let mut table = TableEngine::with_config(numbered(25), columns(), config);
        table.set_page(3);
        table.set_rows(numbered(12));
        let view = table.view();
        assert_eq!(view.current_page, 3);
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn test_empty_table_view() {
        let table = TableEngine::new(Vec::new(), columns());
        let view = table.view();
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.rows.is_empty());
        assert!(!view.has_next());
        assert!(!view.has_previous());
    }

    #[test]
    fn test_keys_use_ids() {
        let mut table = TableEngine::new(numbered(15), columns());
        table.set_page(2);
        let keys = table.view().keys();
        assert_eq!(keys.first(), Some(&RowKey::Id("11".to_string())));
    }

    #[test]
    fn test_reset() {
        let mut table = TableEngine::new(numbered(25), columns());
        table.toggle_sort("id");
        table.set_search_query("1");
        table.set_page(2);
        table.reset();
        assert!(table.sort().is_none());
        assert_eq!(table.search_query(), "");
        assert_eq!(table.page().current_page, 1);
    }

    #[test]
    fn test_cells() {
        let table = TableEngine::new(numbered(1), columns());
        assert_eq!(table.view().cells(table.columns()), vec![vec!["1".to_string(), "row 1".to_string()]]);
    }
}
