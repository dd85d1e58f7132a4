//! Client-side pagination.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination controls: a 1-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub current_page: usize,
    /// Rows per page, at least 1.
    pub page_size: usize,
}

impl PageState {
    /// Creates page state on page 1. A zero page size is coerced to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Returns `ceil(count / page_size)`, which is 0 for an empty set.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Returns the slice of `items` shown on `page` and the total page count.
///
/// The slice is `items[(page-1)*page_size .. page*page_size]`, clipped to the
/// end. A page past the end, or page 0, yields an empty slice; the total page
/// count is unaffected.
///
/// # Example
///
/// ```
/// use kvk_lib::table::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let (slice, pages) = paginate(&items, 3, 10);
/// assert_eq!(pages, 3);
/// assert_eq!(slice, &[21, 22, 23, 24, 25]);
///
/// let (slice, pages) = paginate(&items, 4, 10);
/// assert!(slice.is_empty());
/// assert_eq!(pages, 3);
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let page_size = page_size.max(1);
    let pages = total_pages(items.len(), page_size);
    if page == 0 {
        return (&items[..0], pages);
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    (&items[start..end], pages)
}
