use crate::prelude::*;
use crate::render::renderer_for;
use crate::shelf::{parse_tool_id, Shelf};
use toolshelf_core::session::PageView;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ToggleOptions {
    /// Tool id to bookmark, or un-bookmark if it already is
    pub id: String,
}

/// Confirmation shown after a toggle
pub fn toggle_message(name: &str, bookmarked: bool) -> String {
    if bookmarked {
        format!("Bookmarked {}", name)
    } else {
        format!("Removed bookmark from {}", name)
    }
}

pub fn run_toggle(options: ToggleOptions, shelf: &mut Shelf, global: &crate::Global) -> Result<()> {
    let id = parse_tool_id(&options.id)?;
    let bookmarked = shelf.toggle_bookmark(id)?;
    let name = shelf.tool(id)?.name.clone();

    let mut renderer = renderer_for(global, shelf.theme());
    renderer.render_message(&toggle_message(&name, bookmarked))
}

pub fn run_list(shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let items = shelf.bookmarked_tools();
    let mut renderer = renderer_for(global, shelf.theme());

    if items.is_empty() {
        return renderer.render_message("No bookmarks yet. Use `toolshelf bookmark <id>`.");
    }

    let view = PageView {
        total_matches: items.len(),
        visible_count: items.len(),
        has_more: false,
        items,
    };
    renderer.render_results(&view, &shelf.bookmarks)
}
