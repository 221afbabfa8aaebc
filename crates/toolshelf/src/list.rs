use crate::prelude::{eprintln, *};
use crate::render::{present, renderer_for};
use crate::shelf::Shelf;
use toolshelf_core::query::ALL_CATEGORIES;
use toolshelf_core::session::Session;
use toolshelf_core::stats::summarize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Free-text search over name, description, category and features
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category to show ("All" for every category)
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Sort order: popularity, name, recent, category
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of pages to show (one page is 6 tools)
    #[arg(short, long, default_value = "1")]
    pub pages: usize,
}

/// Apply the options to a fresh session, the same way an interactive user would
pub fn build_session(options: &ListOptions, shelf: &Shelf) -> Session {
    let mut session = shelf.session();

    session.on_search_change(options.search.as_str());
    session.on_category_change(options.category.as_str());
    if let Some(sort) = &options.sort {
        session.on_sort_change(sort);
    }
    let total = session.results(shelf.catalogue.tools()).len();
    for _ in 1..options.pages {
        if session.visible_count() >= total {
            break;
        }
        session.on_load_more();
    }

    session
}

pub fn run(options: ListOptions, shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let session = build_session(&options, shelf);

    if global.verbose {
        let query = session.query();
        eprintln!(
            "search={:?} category={:?} sort={} visible={}",
            query.search_text,
            query.category,
            query.sort_key,
            session.visible_count()
        );
    }

    let mut renderer = renderer_for(global, shelf.theme());
    present(&mut *renderer, &session, shelf)
}

pub fn run_categories(shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let mut renderer = renderer_for(global, shelf.theme());
    renderer.render_categories(&shelf.catalogue.categories(), ALL_CATEGORIES)
}

pub fn run_stats(shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let mut renderer = renderer_for(global, shelf.theme());
    renderer.render_stats(&summarize(shelf.catalogue.tools()))
}
