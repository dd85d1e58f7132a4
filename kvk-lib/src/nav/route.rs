//! Route descriptors.

use serde::Deserialize;
use serde::Serialize;

/// Top-level portal section a route belongs to.
///
/// The category decides the fixed prefix of a route's breadcrumb trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Landing dashboard.
    Dashboard,
    /// Master-data tables (zones, states, districts, ...).
    AllMasters,
    /// Project tracking (CFLD, CRA, FPO, ...).
    Projects,
    /// Data-entry forms.
    FormManagement,
}

impl Category {
    /// Breadcrumb label of the section.
    pub fn label(self) -> &'static str {
        match self {
            Category::Dashboard => "Dashboard",
            Category::AllMasters => "All Masters",
            Category::Projects => "Projects",
            Category::FormManagement => "Form Management",
        }
    }

    /// Path of the section's landing page.
    pub fn landing_path(self) -> &'static str {
        match self {
            Category::Dashboard => "/dashboard",
            Category::AllMasters => "/all-master",
            Category::Projects => "/projects",
            Category::FormManagement => "/forms",
        }
    }
}

/// Static description of one navigable screen.
///
/// `path` may contain `:param` segments, each matching exactly one path
/// segment. `siblings` lists the paths rendered as tabs alongside this
/// screen and by convention includes the route's own path.
///
/// # Example
///
/// ```
/// use kvk_lib::nav::{Category, RouteDescriptor};
///
/// let route = RouteDescriptor::new("/all-master/zone", "Zone Master", Category::AllMasters)
///     .subcategory("Basic Masters")
///     .siblings(["/all-master/zone", "/all-master/state"]);
///
/// assert!(!route.is_pattern());
/// assert_eq!(route.siblings.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    /// Route path, unique among concrete routes.
    pub path: String,
    /// Screen title; the terminal breadcrumb label.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level section.
    pub category: Category,
    /// Optional grouping inside the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Back-navigation target. May point outside the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Ordered tab group, usually including this route's own path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub siblings: Vec<String>,
    /// Link target for the subcategory breadcrumb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb_subcategory_path: Option<String>,
}

impl RouteDescriptor {
    /// Creates a route with only the required fields.
    pub fn new(path: impl Into<String>, title: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: None,
            category,
            subcategory: None,
            parent: None,
            siblings: Vec::new(),
            breadcrumb_subcategory_path: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the subcategory.
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Sets the subcategory and its breadcrumb link.
    pub fn subcategory_at(mut self, subcategory: impl Into<String>, path: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self.breadcrumb_subcategory_path = Some(path.into());
        self
    }

    /// Sets the parent path.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the sibling group.
    pub fn siblings<I, S>(mut self, siblings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.siblings = siblings.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the path contains `:param` segments.
    pub fn is_pattern(&self) -> bool {
        self.path.split('/').any(|seg| seg.starts_with(':'))
    }
}
