//! Browsing state owned by the front-end
//!
//! A [`Session`] is the query plus the pagination cursor. The front-end feeds
//! user actions in through the `on_*` methods and asks for a [`PageView`] to
//! render. Every query change rewinds the cursor to the first page.

use serde::Serialize;

use crate::catalogue::{Catalogue, ToolId, ToolRecord};
use crate::pagination;
use crate::query::{self, QueryState, SortKey};

/// What the front-end should currently display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub items: Vec<ToolRecord>,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    query: QueryState,
    visible_count: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_query(QueryState::default())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: QueryState) -> Self {
        Self {
            query,
            visible_count: pagination::reset(),
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn on_search_change(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.visible_count = pagination::reset();
    }

    pub fn on_category_change(&mut self, category: impl Into<String>) {
        self.query.category = category.into();
        self.visible_count = pagination::reset();
    }

    /// Unrecognized keys sort by popularity
    pub fn on_sort_change(&mut self, key: &str) {
        self.set_sort_key(SortKey::from_key(key));
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
        self.visible_count = pagination::reset();
    }

    pub fn on_load_more(&mut self) {
        self.visible_count = pagination::advance(self.visible_count);
    }

    /// Full ordered result list for the current query
    pub fn results(&self, catalogue: &[ToolRecord]) -> Vec<ToolRecord> {
        query::apply(catalogue, &self.query)
    }

    pub fn view(&self, catalogue: &[ToolRecord]) -> PageView {
        let results = self.results(catalogue);

        PageView {
            items: pagination::visible(&results, self.visible_count).to_vec(),
            total_matches: results.len(),
            visible_count: self.visible_count,
            has_more: pagination::has_more(&results, self.visible_count),
        }
    }

    /// Detail view lookup. Does not touch the query or the cursor.
    pub fn on_info_request<'c>(&self, catalogue: &'c Catalogue, id: ToolId) -> Option<&'c ToolRecord> {
        catalogue.get(id)
    }

    pub fn on_try_request<'c>(&self, catalogue: &'c Catalogue, id: ToolId) -> Option<&'c str> {
        catalogue.try_link(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::sample_tools;

    #[test]
    fn test_new_session_shows_first_page() {
        let tools = sample_tools();
        let view = Session::new().view(&tools);

        assert_eq!(view.items.len(), 6);
        assert_eq!(view.total_matches, 10);
        assert_eq!(view.visible_count, 6);
        assert!(view.has_more);
        assert_eq!(view.items[0].name, "Vite");
    }

    #[test]
    fn test_load_more_reveals_rest() {
        let tools = sample_tools();
        let mut session = Session::new();

        session.on_load_more();
        let view = session.view(&tools);

        assert_eq!(session.visible_count(), 12);
        assert_eq!(view.items.len(), 10);
        assert!(!view.has_more);
    }

    #[test]
    fn test_query_changes_reset_cursor() {
        let tools = sample_tools();
        let mut session = Session::new();

        session.on_load_more();
        session.on_search_change("e");
        assert_eq!(session.visible_count(), 6);

        session.on_load_more();
        session.on_category_change("Bundlers");
        assert_eq!(session.visible_count(), 6);

        session.on_load_more();
        session.on_sort_change("name");
        assert_eq!(session.visible_count(), 6);

        let view = session.view(&tools);
        let names: Vec<&str> = view.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rollup", "Vite", "Webpack"]);
        assert!(!view.has_more);
    }

    #[test]
    fn test_sort_change_unknown_key() {
        let mut session = Session::new();
        session.on_sort_change("name");
        session.on_sort_change("stars");
        assert_eq!(session.query().sort_key, SortKey::Popularity);
    }

    #[test]
    fn test_empty_view() {
        let tools = sample_tools();
        let mut session = Session::new();
        session.on_search_change("nothing matches this");

        let view = session.view(&tools);
        assert!(view.is_empty());
        assert_eq!(view.total_matches, 0);
        assert!(!view.has_more);
    }

    #[test]
    fn test_info_and_try_requests() {
        let mut tools = sample_tools();
        tools[2].try_link.clear();
        let catalogue = Catalogue::from_records(tools).unwrap();

        let mut session = Session::new();
        session.on_load_more();

        assert_eq!(
            session.on_info_request(&catalogue, 2).map(|t| t.name.as_str()),
            Some("Vite")
        );
        assert!(session.on_info_request(&catalogue, 99).is_none());
        assert_eq!(
            session.on_try_request(&catalogue, 1),
            Some("https://example.com/1")
        );
        // Rollup has no link
        assert_eq!(session.on_try_request(&catalogue, 3), None);
        assert_eq!(session.visible_count(), 12);
    }

    #[test]
    fn test_view_never_exceeds_cursor() {
        let tools = sample_tools();
        let mut session = Session::new();
        for _ in 0..3 {
            let view = session.view(&tools);
            assert!(view.items.len() <= session.visible_count());
            assert_eq!(view.items, session.results(&tools)[..view.items.len()]);
            session.on_load_more();
        }
    }
}
