use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod bookmark;
mod browse;
mod config;
mod details;
mod error;
mod list;
mod prelude;
mod render;
mod shelf;
mod theme;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, filter, sort and bookmark a catalogue of developer tools"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Catalogue JSON file to browse instead of the bundled one
    #[clap(long, env = "TOOLSHELF_CATALOGUE", global = true)]
    catalogue: Option<PathBuf>,

    /// File holding bookmarks and the theme preference
    #[clap(long, env = "TOOLSHELF_STORE", global = true)]
    store: Option<PathBuf>,

    /// Config file (defaults to <config dir>/toolshelf/config.toml)
    #[clap(long, env = "TOOLSHELF_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Keep bookmarks and theme in memory for this run only
    #[clap(long, global = true)]
    ephemeral: bool,

    /// Output as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Whether to display additional information.
    #[clap(long, env = "TOOLSHELF_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List tools matching a search, category and sort order
    List(crate::list::ListOptions),

    /// Show the category filter options
    Categories,

    /// Show catalogue totals (all, popular, recently updated)
    Stats,

    /// Show the details of a tool
    Info(crate::details::InfoOptions),

    /// Print (or open) the external link of a tool
    Try(crate::details::TryOptions),

    /// Toggle the bookmark on a tool
    Bookmark(crate::bookmark::ToggleOptions),

    /// List bookmarked tools
    Bookmarks,

    /// Show or toggle the colour theme
    Theme(crate::theme::App),

    /// Interactive browsing session
    Browse,
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let mut shelf = crate::shelf::Shelf::open(&app.global)?;

    match app.command {
        SubCommands::List(options) => crate::list::run(options, &shelf, &app.global),
        SubCommands::Categories => crate::list::run_categories(&shelf, &app.global),
        SubCommands::Stats => crate::list::run_stats(&shelf, &app.global),
        SubCommands::Info(options) => crate::details::run_info(options, &shelf, &app.global),
        SubCommands::Try(options) => crate::details::run_try(options, &shelf, &app.global),
        SubCommands::Bookmark(options) => {
            crate::bookmark::run_toggle(options, &mut shelf, &app.global)
        }
        SubCommands::Bookmarks => crate::bookmark::run_list(&shelf, &app.global),
        SubCommands::Theme(sub_app) => crate::theme::run(sub_app, &mut shelf, &app.global),
        SubCommands::Browse => crate::browse::run(&mut shelf, &app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
