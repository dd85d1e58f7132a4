//! Shared application state

mod context;
mod dashboard;

pub use context::AppContext;
pub use dashboard::DashboardFilters;
pub use dashboard::DashboardStore;
