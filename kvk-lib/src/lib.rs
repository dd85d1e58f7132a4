//! KVK portal core library
//!
//! Client-side building blocks of the Krishi Vigyan Kendra administration
//! portal: an in-memory [`table::TableEngine`] for searchable, sortable,
//! paginated record lists, a [`nav::RouteNavigator`] that derives
//! breadcrumbs, sibling tabs and back targets from a static route table, and
//! an [`ApiClient`] whose token refresh is single-flight across concurrent
//! requests.

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod nav;
pub mod store;
pub mod table;

mod client;

pub use client::*;
