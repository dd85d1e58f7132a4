//! Single-column sorting.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// The active sort: one column key and its direction.
///
/// Only one column is sorted at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field name being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Returns the sort that results from clicking the header for `key`.
    ///
    /// Selecting a new key starts ascending; selecting the active key flips
    /// its direction.
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(active) if active.key == key => SortState {
                key: active.key.clone(),
                direction: active.direction.flipped(),
            },
            _ => SortState::asc(key),
        }
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let ord = a.value_or_null(&self.key).total_cmp(b.value_or_null(&self.key));
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// Sorts rows by the active sort, or returns them unchanged when there is none.
///
/// The sort is stable: rows with equal values keep their input order in
/// both directions. Values are compared by [`Value::total_cmp`], so numbers
/// sort numerically, strings lexicographically, and null or absent fields
/// below everything else.
///
/// [`Value::total_cmp`]: crate::model::Value::total_cmp
pub fn apply_sort<'a>(mut rows: Vec<&'a Row>, sort: Option<&SortState>) -> Vec<&'a Row> {
    if let Some(sort) = sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }
    rows
}
