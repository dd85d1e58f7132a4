//! Free-text search over rows.

use crate::model::Row;

/// Returns the rows matching `query`, in input order.
///
/// A row matches when the string form of **any** of its fields contains
/// `query`, compared case-insensitively. All fields are searched, not only
/// the visible columns. An empty or whitespace-only query matches every row.
///
/// Null and absent fields have the empty string form, so they never match a
/// non-empty query (searching for `"null"` does not find missing values).
///
/// # Example
///
/// ```
/// use kvk_lib::model::Row;
/// use kvk_lib::table::apply_filter;
///
/// let rows = vec![
///     Row::new().set("name", "Banka"),
///     Row::new().set("name", "Araria"),
///     Row::new().set("name", "Arwal"),
/// ];
/// assert_eq!(apply_filter(&rows, "ar").len(), 2);
/// assert_eq!(apply_filter(&rows, "  ").len(), 3);
/// ```
pub fn apply_filter<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    if query.trim().is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter().filter(|row| row.matches_lowercase(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn districts() -> Vec<Row> {
        vec![
            Row::new().set("id", 1).set("name", "Banka").set("qty", 5),
            Row::new().set("id", 2).set("name", "Araria").set("qty", 12),
            Row::new().set("id", 3).set("name", "Arwal").set("qty", 3),
        ]
    }

    #[test]
    fn test_substring_in_any_field() {
        let rows = districts();
        let names: Vec<String> = apply_filter(&rows, "ar")
            .iter()
            .map(|r| r.value_or_null("name").to_string())
            .collect();
        assert_eq!(names, vec!["Araria", "Arwal"]);
    }

    #[test]
    fn test_case_insensitive() {
        let rows = districts();
        assert_eq!(apply_filter(&rows, "BANKA").len(), 1);
    }

    #[test]
    fn test_matches_non_visible_and_numeric_fields() {
        let rows = districts();
        // qty 12 is the only value containing "12"
        let hits = apply_filter(&rows, "12");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value_or_null("name").to_string(), "Araria");
    }

    #[test]
    fn test_empty_query_is_identity() {
        let rows = districts();
        let all = apply_filter(&rows, "");
        assert_eq!(all.len(), 3);
        assert!(all.iter().zip(rows.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
        assert_eq!(apply_filter(&rows, " \t ").len(), 3);
    }

    #[test]
    fn test_null_fields_never_match() {
        let rows = vec![
            Row::new().set("name", crate::model::Value::Null),
            serde_json::from_str(r#"{"name": null}"#).unwrap(),
        ];
        assert!(apply_filter(&rows, "null").is_empty());
        assert!(apply_filter(&rows, "nul").is_empty());
        assert_eq!(rows[1].value_or_null("name").to_string(), "");
    }

    #[test]
    fn test_hyphenated_codes_match_as_received() {
        let rows: Vec<Row> = serde_json::from_str(
            r#"[{"code": "1-2-3"}, {"code": "2024-1-5"}, {"code": "2024-01-05"}]"#,
        )
        .unwrap();
        assert_eq!(apply_filter(&rows, "1-2-3").len(), 1);
        assert_eq!(apply_filter(&rows, "2024-1-5").len(), 1);
        assert!(apply_filter(&rows, "0001-02-03").is_empty());
        assert_eq!(apply_filter(&rows, "2024-01-05").len(), 1);
    }

    #[test]
    fn test_no_match() {
        assert!(apply_filter(&districts(), "patna").is_empty());
    }
}
