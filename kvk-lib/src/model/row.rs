//! Dynamic table row

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Name of the field used as a row's stable identity.
pub const ID_FIELD: &str = "id";

/// A single displayable record in a table view.
///
/// Rows hold field values as a `HashMap<String, Value>`; no schema is
/// enforced. Rows should expose an `id` field, which screens use as the
/// render key.
///
/// # Example
///
/// ```
/// use kvk_lib::model::{Row, Value};
///
/// let row = Row::new()
///     .set("id", 1)
///     .set("name", "Banka")
///     .set("qty", 5);
///
/// assert_eq!(row.get("name"), Some(&Value::from("Banka")));
/// assert_eq!(row.key(7).to_string(), "1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, Value>,
}

/// Render key for a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// String form of the row's `id` field.
    Id(String),
    /// Positional index. Not stable across sort or filter.
    Index(usize),
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Id(id) => f.write_str(id),
            RowKey::Index(i) => write!(f, "#{}", i),
        }
    }
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, treating an absent field as null.
    pub fn value_or_null(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the identity field, if present and non-null.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ID_FIELD).filter(|v| !v.is_null())
    }

    /// Returns the render key: the `id` field when present, otherwise `index`.
    pub fn key(&self, index: usize) -> RowKey {
        match self.id() {
            Some(id) => RowKey::Id(id.to_string()),
            None => RowKey::Index(index),
        }
    }

    /// Returns `true` if any field's string form contains `needle`.
    ///
    /// `needle` must already be lowercase; field values are lowercased here.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.fields
            .values()
            .any(|v| v.to_string().to_lowercase().contains(needle))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_id() {
        let row = Row::new().set("id", 42).set("name", "Arwal");
        assert_eq!(row.key(3), RowKey::Id("42".to_string()));
    }

    #[test]
    fn test_key_falls_back_to_index() {
        let row = Row::new().set("name", "Arwal");
        assert_eq!(row.key(3), RowKey::Index(3));

        let null_id = Row::new().set("id", Value::Null);
        assert_eq!(null_id.key(0), RowKey::Index(0));
    }

    #[test]
    fn test_value_or_null() {
        let row = Row::new().set("qty", 5);
        assert_eq!(row.value_or_null("qty"), &Value::Int(5));
        assert!(row.value_or_null("missing").is_null());
    }

    #[test]
    fn test_deserialize_from_object() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "name": "Banka", "qty": 5}"#).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("qty"), Some(&Value::Int(5)));
    }
}
