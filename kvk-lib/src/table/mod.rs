//! Client-side tabular data engine.
//!
//! Pure search/sort/paginate transforms plus [`TableEngine`], the per-screen
//! state holder that drives every list screen.

mod engine;
mod filter;
mod page;
mod sort;

pub use engine::PageClamp;
pub use engine::TableConfig;
pub use engine::TableEngine;
pub use engine::TableView;
pub use filter::apply_filter;
pub use page::PageState;
pub use page::paginate;
pub use page::total_pages;
pub use sort::Direction;
pub use sort::SortState;
pub use sort::apply_sort;
