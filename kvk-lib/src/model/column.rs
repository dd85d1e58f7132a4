//! Column metadata for table views

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::Row;
use super::Value;

/// Custom cell renderer: `(value, row) -> display text`.
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Describes how one field of a [`Row`] is labeled, sorted and rendered.
///
/// Columns are ordered; the order of a column list is display order.
///
/// # Example
///
/// ```
/// use kvk_lib::model::{ColumnDescriptor, Row};
///
/// let qty = ColumnDescriptor::new("qty", "Quantity")
///     .sortable()
///     .render(|value, _row| format!("{} units", value));
///
/// let row = Row::new().set("qty", 5);
/// assert_eq!(qty.cell(&row), "5 units");
/// ```
#[derive(Clone, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name addressed by this column.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header may toggle sorting.
    #[serde(default)]
    pub sortable: bool,
    #[serde(skip)]
    renderer: Option<CellRenderer>,
}

impl ColumnDescriptor {
    /// Creates a non-sortable column without a custom renderer.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            renderer: None,
        }
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a custom cell renderer.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Returns `true` if a custom renderer is set.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Returns the display text for this column's cell in `row`.
    ///
    /// Absent fields render as null (empty text unless a renderer says otherwise).
    pub fn cell(&self, row: &Row) -> String {
        let value = row.value_or_null(&self.key);
        match &self.renderer {
            Some(render) => render(value, row),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .finish()
    }
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.label == other.label && self.sortable == other.sortable
    }
}

/// Infers one sortable column per field of `row`, sorted by field name
/// with `id` first.
pub fn infer_columns(row: &Row) -> Vec<ColumnDescriptor> {
    let mut keys: Vec<&String> = row.fields().keys().collect();
    keys.sort_by(|a, b| (a.as_str() != super::ID_FIELD, a).cmp(&(b.as_str() != super::ID_FIELD, b)));
    keys.into_iter()
        .map(|k| ColumnDescriptor::new(k.clone(), k.clone()).sortable())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default_display() {
        let col = ColumnDescriptor::new("name", "Name");
        let row = Row::new().set("name", "Araria");
        assert_eq!(col.cell(&row), "Araria");
        assert_eq!(col.cell(&Row::new()), "");
    }

    #[test]
    fn test_renderer_sees_whole_row() {
        let col = ColumnDescriptor::new("name", "District")
            .render(|v, row| format!("{} ({})", v, row.value_or_null("state")));
        let row = Row::new().set("name", "Banka").set("state", "Bihar");
        assert_eq!(col.cell(&row), "Banka (Bihar)");
    }

    #[test]
    fn test_deserialize_defaults() {
        let cols: Vec<ColumnDescriptor> = serde_json::from_str(
            r#"[{"key": "name", "label": "Name"}, {"key": "qty", "label": "Qty", "sortable": true}]"#,
        )
        .unwrap();
        assert!(!cols[0].sortable);
        assert!(cols[1].sortable);
        assert!(!cols[1].has_renderer());
    }

    #[test]
    fn test_infer_columns_puts_id_first() {
        let row = Row::new().set("qty", 1).set("id", 1).set("name", "x");
        let keys: Vec<String> = infer_columns(&row).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["id", "name", "qty"]);
    }
}
