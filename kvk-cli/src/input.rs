//! Loading table data files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use kvk_lib::model::ColumnDescriptor;
use kvk_lib::model::Row;
use kvk_lib::model::infer_columns;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    Rows(Vec<Row>),
    Full {
        #[serde(default)]
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
    },
}

/// Rows and columns read from a data file.
pub struct TableData {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

/// Parses `{"columns": [...], "rows": [...]}` or a bare array of rows.
///
/// Missing columns are inferred from the first row, all sortable.
pub fn parse_table(json: &str) -> Result<TableData> {
    let (columns, rows) = match serde_json::from_str(json).context("invalid table data")? {
        TableFile::Full { columns, rows } => (columns, rows),
        TableFile::Rows(rows) => (Vec::new(), rows),
    };
    let columns = match (columns.is_empty(), rows.first()) {
        (true, Some(first)) => infer_columns(first),
        _ => columns,
    };
    Ok(TableData { columns, rows })
}

/// Reads and parses a table data file.
pub fn load_table(path: &Path) -> Result<TableData> {
    let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_table(&json).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_rows_infer_columns() {
        let data = parse_table(r#"[{"id": 1, "name": "Banka"}, {"id": 2, "name": "Arwal"}]"#).unwrap();
        assert_eq!(data.rows.len(), 2);
        let keys: Vec<_> = data.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["id", "name"]);
        assert!(data.columns.iter().all(|c| c.sortable));
    }

    #[test]
    fn test_explicit_columns() {
        let data = parse_table(
            r#"{"columns": [{"key": "name", "label": "District"}], "rows": [{"name": "Banka"}]}"#,
        )
        .unwrap();
        assert_eq!(data.columns.len(), 1);
        assert!(!data.columns[0].sortable);
    }

    #[test]
    fn test_empty_and_invalid() {
        let data = parse_table("[]").unwrap();
        assert!(data.columns.is_empty());
        assert!(parse_table(r#"{"rows": 3}"#).is_err());
    }
}
