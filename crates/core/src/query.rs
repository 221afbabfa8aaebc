//! Search, category filter and sort over the catalogue
//!
//! [`apply`] is the whole pipeline. It never mutates its input and returns a
//! fresh, ordered list, so calling it twice with the same arguments yields the
//! same result.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalogue::ToolRecord;

/// Category sentinel that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rating first
    #[default]
    Popularity,
    /// Alphabetical by name
    Name,
    /// Updated "days" ago, then "weeks" ago, then everything else
    Recent,
    /// Alphabetical by category
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Popularity,
        SortKey::Name,
        SortKey::Recent,
        SortKey::Category,
    ];

    /// Parse a sort key; anything unrecognized falls back to [`SortKey::Popularity`]
    pub fn from_key(key: &str) -> SortKey {
        match key.trim().to_lowercase().as_str() {
            "name" => SortKey::Name,
            "recent" => SortKey::Recent,
            "category" => SortKey::Category,
            "popularity" => SortKey::Popularity,
            other => {
                log::debug!("Unknown sort key {other:?}, using popularity");
                SortKey::Popularity
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::Name => "name",
            SortKey::Recent => "recent",
            SortKey::Category => "category",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user can change about the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub category: String,
    pub sort_key: SortKey,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::default(),
        }
    }
}

impl QueryState {
    /// Search text as it is compared: trimmed and lower-cased
    pub fn needle(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    pub fn filters_category(&self) -> bool {
        self.category != ALL_CATEGORIES
    }

    /// True when `tool` passes both the search and the category filter
    pub fn matches(&self, tool: &ToolRecord) -> bool {
        let needle = self.needle();
        (needle.is_empty() || tool.matches_search(&needle))
            && (!self.filters_category() || tool.category == self.category)
    }
}

/// Filter and sort the catalogue
///
/// Steps run in a fixed order: search filter, category filter, stable sort.
pub fn apply(catalogue: &[ToolRecord], state: &QueryState) -> Vec<ToolRecord> {
    let needle = state.needle();

    let mut results: Vec<ToolRecord> = catalogue
        .iter()
        .filter(|tool| needle.is_empty() || tool.matches_search(&needle))
        .filter(|tool| !state.filters_category() || tool.category == state.category)
        .cloned()
        .collect();

    sort_tools(&mut results, state.sort_key);
    results
}

/// Stable in-place sort by `key`
pub fn sort_tools(tools: &mut [ToolRecord], key: SortKey) {
    match key {
        SortKey::Popularity => tools.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => tools.sort_by_cached_key(|tool| collation_key(&tool.name)),
        SortKey::Category => tools.sort_by_cached_key(|tool| collation_key(&tool.category)),
        SortKey::Recent => tools.sort_by_key(ToolRecord::recency_tier),
    }
}

/// Locale-aware comparison of two display strings
pub fn locale_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// ASCII punctuation and symbols in root collation order
const SYMBOL_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Sort key approximating a locale collation.
///
/// Primary level ignores accents and case and ranks whitespace, then
/// punctuation and symbols, then digits, then letters. The secondary level
/// swaps case so that "apple" sorts before "Apple" and "e" before "é".
fn collation_key(s: &str) -> (Vec<(u8, u32)>, String) {
    let primary = s
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(primary_weight)
        .collect();

    let secondary = s
        .chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect();

    (primary, secondary)
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, 0)
    } else if let Some(rank) = SYMBOL_ORDER.find(c) {
        (1, rank as u32)
    } else if c.is_alphanumeric() {
        if c.is_numeric() {
            (3, c as u32)
        } else {
            (4, c as u32)
        }
    } else {
        (2, c as u32)
    }
}
