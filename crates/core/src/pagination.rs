//! "Load more" pagination cursor
//!
//! The cursor is just a count of visible results. It starts at one page,
//! grows one page at a time, and goes back to one page whenever the query
//! changes.

/// Number of results revealed per page
pub const PAGE_SIZE: usize = 6;

/// The leading `visible_count` results, or all of them if there are fewer
pub fn visible<T>(results: &[T], visible_count: usize) -> &[T] {
    &results[..visible_count.min(results.len())]
}

/// Whether a "load more" would reveal anything
pub fn has_more<T>(results: &[T], visible_count: usize) -> bool {
    visible_count < results.len()
}

/// Cursor position after one "load more"
pub fn advance(visible_count: usize) -> usize {
    visible_count.saturating_add(PAGE_SIZE)
}

/// Cursor position for a fresh query
pub fn reset() -> usize {
    PAGE_SIZE
}
