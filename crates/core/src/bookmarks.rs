//! Bookmarked tools
//!
//! The set is hydrated once from the `bookmarkedTools` key and written back in
//! full on every toggle. Bad persisted data never surfaces as an error: it just
//! means "no bookmarks".

use std::collections::BTreeSet;

use crate::catalogue::ToolId;
use crate::storage::{KeyValueStore, StoreError};

/// Storage key holding the JSON array of bookmarked ids
pub const BOOKMARKS_KEY: &str = "bookmarkedTools";

/// Decode a persisted bookmark array, `None` if it is not a JSON array of ids
pub fn decode_bookmarks(raw: &str) -> Option<BTreeSet<ToolId>> {
    serde_json::from_str::<Vec<ToolId>>(raw)
        .map(|ids| ids.into_iter().collect())
        .ok()
}

/// Encode the set as a JSON array, ascending
pub fn encode_bookmarks(ids: &BTreeSet<ToolId>) -> String {
    let ids: Vec<ToolId> = ids.iter().copied().collect();
    // Serializing a Vec<u64> cannot fail
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkStore {
    ids: BTreeSet<ToolId>,
}

impl BookmarkStore {
    /// Hydrate from `store`; absent, unreadable or malformed data yields an empty set
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let raw = match store.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("Unable to read bookmarks, starting empty: {}", e);
                return Self::default();
            }
        };

        match decode_bookmarks(&raw) {
            Some(ids) => Self { ids },
            None => {
                log::warn!("Ignoring malformed bookmark data: {raw:?}");
                Self::default()
            }
        }
    }

    /// Flip membership of `id` and persist the full set.
    ///
    /// Returns `true` when the tool is now bookmarked. If the write fails the
    /// set is left as it was.
    pub fn toggle<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: ToolId,
    ) -> Result<bool, StoreError> {
        let bookmarked = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };

        if let Err(e) = store.set(BOOKMARKS_KEY, &encode_bookmarks(&self.ids)) {
            if bookmarked {
                self.ids.remove(&id);
            } else {
                self.ids.insert(id);
            }
            return Err(e);
        }

        log::debug!("Tool {id} bookmarked: {bookmarked}");
        Ok(bookmarked)
    }

    pub fn contains(&self, id: ToolId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
