//! Route-driven navigation: breadcrumbs, sibling tabs and back targets.

mod breadcrumb;
mod navigator;
mod pattern;
mod route;
mod routes;

pub use breadcrumb::BackTarget;
pub use breadcrumb::Breadcrumb;
pub use breadcrumb::format_trail;
pub use navigator::MatchTier;
pub use navigator::PrefixMatch;
pub use navigator::RouteMatch;
pub use navigator::RouteNavigator;
pub use pattern::normalize;
pub use route::Category;
pub use route::RouteDescriptor;
pub use routes::kvk_routes;
