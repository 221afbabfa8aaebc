//! Terminal and JSON presentation of core results
//!
//! Commands never print tool data directly; they hand plain data from the core
//! to a [`Renderer`].

use crate::prelude::{eprintln, println, *};
use colored::{Color, Colorize};
use serde_json::json;
use toolshelf_core::bookmarks::BookmarkStore;
use toolshelf_core::catalogue::ToolRecord;
use toolshelf_core::query::QueryState;
use toolshelf_core::session::{PageView, Session};
use toolshelf_core::stats::Stats;
use toolshelf_core::theme::Theme;

use crate::shelf::Shelf;

pub trait Renderer {
    fn render_results(&mut self, view: &PageView, bookmarks: &BookmarkStore) -> Result<()>;
    fn render_empty_state(&mut self, query: &QueryState) -> Result<()>;
    fn render_stats(&mut self, stats: &Stats) -> Result<()>;
    fn render_details(&mut self, tool: &ToolRecord, bookmarked: bool) -> Result<()>;
    fn render_categories(&mut self, categories: &[String], selected: &str) -> Result<()>;
    fn render_message(&mut self, message: &str) -> Result<()>;

    /// Follow a theme change; renderers without colours ignore it
    fn set_theme(&mut self, _theme: Theme) {}
}

/// Pick the renderer for the current output mode and theme
pub fn renderer_for(global: &crate::Global, theme: Theme) -> Box<dyn Renderer> {
    if global.json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TerminalRenderer::new(theme))
    }
}

/// Render the current page of a session, or the empty state
pub fn present(renderer: &mut dyn Renderer, session: &Session, shelf: &Shelf) -> Result<()> {
    let view = session.view(shelf.catalogue.tools());
    if view.is_empty() {
        renderer.render_empty_state(session.query())
    } else {
        renderer.render_results(&view, &shelf.bookmarks)
    }
}

/// Colours used by the terminal renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: Color,
    pub accent: Color,
    pub muted: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                heading: Color::Blue,
                accent: Color::Magenta,
                muted: Color::BrightBlack,
                warning: Color::Red,
            },
            Theme::Dark => Palette {
                heading: Color::BrightCyan,
                accent: Color::BrightYellow,
                muted: Color::White,
                warning: Color::BrightRed,
            },
        }
    }
}

pub struct TerminalRenderer {
    palette: Palette,
}

impl TerminalRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: Palette::for_theme(theme),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_results(&mut self, view: &PageView, bookmarks: &BookmarkStore) -> Result<()> {
        println!("{}", format_results_header(view, &self.palette));
        format_results_table(view, bookmarks).printstd();

        if view.has_more {
            eprintln!(
                "\n{}",
                format!(
                    "{} more. Type `more` in `toolshelf browse` or pass --pages.",
                    view.total_matches - view.items.len()
                )
                .color(self.palette.muted)
            );
        }
        Ok(())
    }

    fn render_empty_state(&mut self, query: &QueryState) -> Result<()> {
        println!("{}", format_empty_state(query, &self.palette));
        Ok(())
    }

    fn render_stats(&mut self, stats: &Stats) -> Result<()> {
        let mut table = new_table();
        table.add_row(prettytable::row!["Total tools", stats.total]);
        table.add_row(prettytable::row!["Popular (4.5+)", stats.popular]);
        table.add_row(prettytable::row!["Updated recently", stats.recent]);
        table.printstd();
        Ok(())
    }

    fn render_details(&mut self, tool: &ToolRecord, bookmarked: bool) -> Result<()> {
        println!("{}", format_details(tool, bookmarked, &self.palette));
        Ok(())
    }

    fn render_categories(&mut self, categories: &[String], selected: &str) -> Result<()> {
        println!("{}", format_categories(categories, selected, &self.palette));
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        println!("{}", message.color(self.palette.accent));
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
    }
}

pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &serde_json::Value) -> Result<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", text);
        Ok(())
    }
}

impl Renderer for JsonRenderer {
    fn render_results(&mut self, view: &PageView, bookmarks: &BookmarkStore) -> Result<()> {
        Self::print(&results_json(view, bookmarks))
    }

    fn render_empty_state(&mut self, query: &QueryState) -> Result<()> {
        Self::print(&json!({
            "query": query,
            "items": [],
            "total_matches": 0,
            "has_more": false,
        }))
    }

    fn render_stats(&mut self, stats: &Stats) -> Result<()> {
        Self::print(&json!(stats))
    }

    fn render_details(&mut self, tool: &ToolRecord, bookmarked: bool) -> Result<()> {
        Self::print(&json!({ "tool": tool, "bookmarked": bookmarked }))
    }

    fn render_categories(&mut self, categories: &[String], selected: &str) -> Result<()> {
        Self::print(&json!({ "categories": categories, "selected": selected }))
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        Self::print(&json!({ "message": message }))
    }
}

pub fn results_json(view: &PageView, bookmarks: &BookmarkStore) -> serde_json::Value {
    let items: Vec<serde_json::Value> = view
        .items
        .iter()
        .map(|tool| json!({ "tool": tool, "bookmarked": bookmarks.contains(tool.id) }))
        .collect();

    json!({
        "items": items,
        "total_matches": view.total_matches,
        "visible_count": view.visible_count,
        "has_more": view.has_more,
    })
}

fn format_results_header(view: &PageView, palette: &Palette) -> String {
    format!(
        "Showing {} of {} tool(s)\n",
        view.items.len(),
        view.total_matches
    )
    .color(palette.heading)
    .bold()
    .to_string()
}

pub fn format_results_table(view: &PageView, bookmarks: &BookmarkStore) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "", "ID", "Name", "Category", "Rating", "Downloads", "Updated"
    ]);

    for tool in &view.items {
        let marker = if bookmarks.contains(tool.id) { "*" } else { "" };
        table.add_row(prettytable::row![
            marker,
            tool.id,
            &tool.name,
            &tool.category,
            format!("{:.1}", tool.rating),
            &tool.downloads,
            &tool.last_update
        ]);
    }

    table
}

pub fn format_empty_state(query: &QueryState, palette: &Palette) -> String {
    let mut result = format!("{}\n", "No tools found".color(palette.warning).bold());

    let needle = query.search_text.trim();
    if !needle.is_empty() {
        result.push_str(&format!("  Search: {:?}\n", needle));
    }
    if query.filters_category() {
        result.push_str(&format!("  Category: {}\n", query.category));
    }
    result.push_str(&format!(
        "{}",
        "Try a different search or the \"All\" category.".color(palette.muted)
    ));

    result
}

/// Detail card: everything the catalogue knows about a tool
pub fn format_details(tool: &ToolRecord, bookmarked: bool, palette: &Palette) -> String {
    let mut result = String::new();

    let title = if bookmarked {
        format!("{} (bookmarked)", tool.name)
    } else {
        tool.name.clone()
    };
    result.push_str(&format!("{}\n\n", title.color(palette.heading).bold()));

    result.push_str(&format!("{}: {}\n", "Category".color(palette.accent), tool.category));
    result.push_str(&format!("{}: {}/5\n", "Rating".color(palette.accent), tool.rating));
    result.push_str(&format!("{}: {}\n", "Downloads".color(palette.accent), tool.downloads));
    result.push_str(&format!(
        "{}: {}\n",
        "Last Update".color(palette.accent),
        tool.last_update
    ));

    if !tool.features.is_empty() {
        result.push_str(&format!("\n{}:\n", "Features".color(palette.accent)));
        for feature in &tool.features {
            result.push_str(&format!("  • {}\n", feature));
        }
    }

    result.push_str(&format!("\n{}\n", tool.description));

    if !tool.try_link.is_empty() {
        result.push_str(&format!(
            "\n{}: {}\n",
            "Try".color(palette.accent),
            tool.try_link.color(palette.muted).underline()
        ));
    }

    result
}

pub fn format_categories(categories: &[String], selected: &str, palette: &Palette) -> String {
    categories
        .iter()
        .map(|category| {
            if category == selected {
                format!("[{}]", category)
                    .color(palette.accent)
                    .bold()
                    .to_string()
            } else {
                category.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
