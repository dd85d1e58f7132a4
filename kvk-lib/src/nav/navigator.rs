//! Route resolution and navigation chrome.

use std::collections::HashMap;
use std::collections::HashSet;

use dashmap::DashMap;
use log::debug;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use super::breadcrumb::BackTarget;
use super::breadcrumb::Breadcrumb;
use super::breadcrumb::HOME;
use super::pattern::is_nested_under;
use super::pattern::match_pattern;
use super::pattern::normalize;
use super::route::Category;
use super::route::RouteDescriptor;
use super::routes::kvk_routes;
use crate::error::ConfigError;

/// Rule for choosing among several routes that are prefixes of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
    /// The longest matching route path wins; ties go to the first declared.
    #[default]
    Longest,
    /// The first declared matching route wins.
    FirstDeclared,
}

/// Which resolution tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Path equals a route path.
    Exact,
    /// Path matches a `:param` route.
    Pattern,
    /// Path is nested below a route path.
    Prefix,
}

/// A resolved route together with its captured `:param` values.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    /// The matched descriptor.
    pub route: &'a RouteDescriptor,
    /// Captured parameters; empty unless `tier` is [`MatchTier::Pattern`].
    pub params: HashMap<String, String>,
    /// Resolution tier.
    pub tier: MatchTier,
}

/// Resolves breadcrumbs, sibling tabs and back targets from a static route table.
///
/// Resolution of a path tries, in order:
/// 1. an exact match on a route path;
/// 2. a `:param` pattern route, one segment per parameter;
/// 3. a route the path is nested under (`route.path + "/"` prefix), chosen
///    by the configured [`PrefixMatch`] rule.
///
/// Tiers 1 and 2 take the first declared match. Query strings, fragments
/// and trailing slashes are ignored. Exact hits are memoized, so the memo
/// never holds more entries than there are routes; pattern and prefix
/// resolution is recomputed per call.
///
/// # Example
///
/// ```
/// use kvk_lib::nav::{BackTarget, RouteNavigator};
///
/// let nav = RouteNavigator::kvk();
/// let route = nav.resolve("/forms/about-kvk/vehicles").unwrap();
/// assert_eq!(route.title, "Vehicle Details");
///
/// let tabs = nav.siblings_of("/forms/about-kvk/vehicles");
/// assert!(tabs.iter().any(|r| r.path == "/forms/about-kvk/employee"));
///
/// assert_eq!(nav.back_target_of("/unknown", None), BackTarget::History);
/// ```
#[derive(Debug)]
pub struct RouteNavigator {
    routes: Vec<RouteDescriptor>,
    prefix_match: PrefixMatch,
    cache: DashMap<String, usize>,
}

impl RouteNavigator {
    /// Creates a navigator over `routes`, in declaration order.
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        let mut seen = HashSet::new();
        for route in routes.iter().filter(|r| !r.is_pattern()) {
            if !seen.insert(route.path.as_str()) {
                warn!("duplicate route path {:?}; first declaration wins", route.path);
            }
        }
        Self {
            routes,
            prefix_match: PrefixMatch::default(),
            cache: DashMap::new(),
        }
    }

    /// Creates a navigator over the built-in KVK portal route table.
    pub fn kvk() -> Self {
        Self::new(kvk_routes().to_vec())
    }

    /// Creates a navigator from a JSON array of route descriptors.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let routes: Vec<RouteDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(routes))
    }

    /// Sets the prefix-match rule.
    pub fn with_prefix_match(mut self, prefix_match: PrefixMatch) -> Self {
        self.prefix_match = prefix_match;
        self.cache.clear();
        self
    }

    /// Returns the route table.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Returns the prefix-match rule.
    pub fn prefix_match(&self) -> PrefixMatch {
        self.prefix_match
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolves `path` to its route descriptor.
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        self.lookup(path).map(|(index, _)| &self.routes[index])
    }

    /// Resolves `path` and captures its `:param` values.
    pub fn resolve_match(&self, path: &str) -> Option<RouteMatch<'_>> {
        let (index, tier) = self.lookup(path)?;
        let route = &self.routes[index];
        let params = match tier {
            MatchTier::Pattern => match_pattern(&route.path, normalize(path)).unwrap_or_default(),
            MatchTier::Exact | MatchTier::Prefix => HashMap::new(),
        };
        Some(RouteMatch { route, params, tier })
    }

    fn lookup(&self, path: &str) -> Option<(usize, MatchTier)> {
        let path = normalize(path);
        if let Some(index) = self.cache.get(path) {
            return Some((*index, MatchTier::Exact));
        }
        let found = self.find(path);
        match found {
            Some((index, MatchTier::Exact)) => {
                self.cache.insert(path.to_string(), index);
            }
            Some(_) => {}
            None => debug!("no route for {:?}", path),
        }
        found
    }

    fn find(&self, path: &str) -> Option<(usize, MatchTier)> {
        if let Some(i) = self.routes.iter().position(|r| r.path == path) {
            return Some((i, MatchTier::Exact));
        }

        if let Some(i) = self
            .routes
            .iter()
            .position(|r| r.is_pattern() && match_pattern(&r.path, path).is_some())
        {
            return Some((i, MatchTier::Pattern));
        }

        let mut candidates = self
            .routes
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_pattern() && is_nested_under(&r.path, path));
        let best = match self.prefix_match {
            PrefixMatch::FirstDeclared => candidates.next(),
            PrefixMatch::Longest => {
                let mut best: Option<(usize, &RouteDescriptor)> = None;
                for (i, route) in candidates {
                    if best.is_none_or(|(_, b)| route.path.len() > b.path.len()) {
                        best = Some((i, route));
                    }
                }
                best
            }
        };
        best.map(|(i, _)| (i, MatchTier::Prefix))
    }

    // -------------------------------------------------------------------------
    // Chrome
    // -------------------------------------------------------------------------

    /// Returns the tab group for `path`, in declared order and including the
    /// route itself.
    ///
    /// Sibling paths that do not resolve are dropped. Fewer than two
    /// resolved siblings yield an empty list, since a single tab is not shown.
    pub fn siblings_of(&self, path: &str) -> Vec<&RouteDescriptor> {
        let Some(route) = self.resolve(path) else {
            return Vec::new();
        };
        let siblings: Vec<&RouteDescriptor> = route
            .siblings
            .iter()
            .filter_map(|p| self.resolve(p))
            .collect();
        if siblings.len() < 2 {
            return Vec::new();
        }
        siblings
    }

    /// Builds the breadcrumb trail for `path`.
    ///
    /// The trail is `Home`, the route's section (omitted for dashboard
    /// routes), its subcategory if any, its parent if that is a distinct
    /// known route, and finally the route itself marked as current. An
    /// unresolved path yields an empty trail.
    pub fn breadcrumbs_for(&self, path: &str) -> Vec<Breadcrumb> {
        let Some(route) = self.resolve(path) else {
            return Vec::new();
        };
        let current = Breadcrumb::current(&route.title, &route.path);
        if route.path == HOME.1 {
            return vec![current];
        }

        let mut trail = vec![Breadcrumb::link(HOME.0, HOME.1)];
        let landing = route.category.landing_path();
        if route.category != Category::Dashboard {
            trail.push(Breadcrumb::link(route.category.label(), landing));
        }

        if let Some(sub) = &route.subcategory {
            trail.push(match &route.breadcrumb_subcategory_path {
                Some(p) => Breadcrumb::link(sub, p),
                None => Breadcrumb::text(sub),
            });
        }

        if let Some(parent) = self.parent_crumb(route, landing) {
            trail.push(parent);
        }

        trail.push(current);
        trail
    }

    /// A parent only earns a crumb when it names a route directly (exact or
    /// pattern match). A parent path that would only resolve by prefix is
    /// treated as dangling.
    fn parent_crumb(&self, route: &RouteDescriptor, landing: &str) -> Option<Breadcrumb> {
        let parent_path = normalize(route.parent.as_deref()?);
        if parent_path == landing
            || parent_path == HOME.1
            || route.breadcrumb_subcategory_path.as_deref().map(normalize) == Some(parent_path)
        {
            return None;
        }
        let parent = self
            .resolve_match(parent_path)
            .filter(|m| m.tier != MatchTier::Prefix)?
            .route;
        if parent.path == route.path || parent.path == landing {
            return None;
        }
        Some(Breadcrumb::link(&parent.title, parent_path))
    }

    /// Returns where a back button on `path` should go.
    ///
    /// The route's declared parent wins, then `fallback`, then browser history.
    /// Dangling parents are returned as declared.
    pub fn back_target_of(&self, path: &str, fallback: Option<&str>) -> BackTarget {
        if let Some(parent) = self.resolve(path).and_then(|r| r.parent.as_ref()) {
            return BackTarget::Path(parent.clone());
        }
        match fallback {
            Some(f) => BackTarget::Path(f.to_string()),
            None => BackTarget::History,
        }
    }
}

impl Clone for RouteNavigator {
    fn clone(&self) -> Self {
        Self::new(self.routes.clone()).with_prefix_match(self.prefix_match)
    }
}
