use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::query::ALL_CATEGORIES;

/// Identifier of a tool, unique within a catalogue
pub type ToolId = u64;

/// Error type for catalogue loading
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Invalid catalogue JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate tool id {0} in catalogue")]
    DuplicateId(ToolId),
}

/// A single catalogue entry as it appears in the bundled JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    pub id: ToolId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Score in the `0..=5` range
    pub rating: f64,
    /// Display string such as "25M+", never sorted on
    pub downloads: String,
    /// Display string such as "2 days ago"
    pub last_update: String,
    pub features: Vec<String>,
    pub color: String,
    pub icon: String,
    /// External link; empty when the tool has none
    #[serde(default)]
    pub try_link: String,
}

impl ToolRecord {
    /// Coarse recency bucket derived from `last_update`.
    ///
    /// 1 when it mentions "day", 2 for "week", 3 otherwise. Lower is more recent.
    pub fn recency_tier(&self) -> u8 {
        if self.last_update.contains("day") {
            1
        } else if self.last_update.contains("week") {
            2
        } else {
            3
        }
    }

    /// Updated within the last few weeks
    pub fn is_recent(&self) -> bool {
        self.recency_tier() < 3
    }

    /// Case-insensitive substring match against name, description, category and features.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .features
                .iter()
                .any(|feature| feature.to_lowercase().contains(needle))
    }
}

/// The immutable list of tools, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    tools: Vec<ToolRecord>,
}

impl Catalogue {
    /// Parse a JSON array of tool records
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let tools: Vec<ToolRecord> = serde_json::from_str(json)?;
        Self::from_records(tools)
    }

    /// Build a catalogue, rejecting duplicate ids
    pub fn from_records(tools: Vec<ToolRecord>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.id) {
                return Err(CatalogueError::DuplicateId(tool.id));
            }
        }

        log::debug!("Loaded catalogue with {} tools", tools.len());
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a tool for the detail view
    pub fn get(&self, id: ToolId) -> Option<&ToolRecord> {
        self.tools.iter().find(|tool| tool.id == id)
    }

    /// External link of a tool, absent for unknown ids and tools without a link
    pub fn try_link(&self, id: ToolId) -> Option<&str> {
        self.get(id)
            .map(|tool| tool.try_link.as_str())
            .filter(|link| !link.is_empty())
    }

    /// Category filter options: "All" followed by each category in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for tool in &self.tools {
            if !categories.iter().any(|c| c == &tool.category) {
                categories.push(tool.category.clone());
            }
        }
        categories
    }
}
