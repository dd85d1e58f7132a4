//! Breadcrumb trail and back-navigation types.

use serde::Serialize;

/// Label and path of the trail's first entry.
pub const HOME: (&str, &str) = ("Home", "/dashboard");

/// One entry of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display label.
    pub label: String,
    /// Link target; `None` for non-navigable entries.
    pub path: Option<String>,
    /// Marks the terminal entry for the page being shown.
    pub current: bool,
}

impl Breadcrumb {
    /// Creates a navigable entry.
    pub fn link(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: Some(path.into()),
            current: false,
        }
    }

    /// Creates a non-navigable entry.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
            current: false,
        }
    }

    /// Creates the terminal entry for the current page.
    pub fn current(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: Some(path.into()),
            current: true,
        }
    }

    /// Returns `true` if the entry should render as a link.
    pub fn is_navigable(&self) -> bool {
        self.path.is_some() && !self.current
    }
}

/// Where a back button should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackTarget {
    /// Navigate to this path.
    Path(String),
    /// Use browser history.
    History,
}

impl BackTarget {
    /// Returns the path, if the target is not history.
    pub fn path(&self) -> Option<&str> {
        match self {
            BackTarget::Path(p) => Some(p),
            BackTarget::History => None,
        }
    }
}

/// Renders a trail as `A > B > C`.
pub fn format_trail(trail: &[Breadcrumb]) -> String {
    trail
        .iter()
        .map(|b| b.label.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}
