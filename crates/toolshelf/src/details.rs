use crate::prelude::{println, *};
use crate::render::renderer_for;
use crate::shelf::{parse_tool_id, Shelf};
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InfoOptions {
    /// Tool id (as shown by `toolshelf list`)
    pub id: String,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TryOptions {
    /// Tool id (as shown by `toolshelf list`)
    pub id: String,

    /// Open the link in the default browser instead of printing it
    #[arg(long)]
    pub open: bool,
}

pub fn run_info(options: InfoOptions, shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let id = parse_tool_id(&options.id)?;
    let tool = shelf.tool(id)?;

    let mut renderer = renderer_for(global, shelf.theme());
    renderer.render_details(tool, shelf.bookmarks.contains(id))
}

pub fn run_try(options: TryOptions, shelf: &Shelf, global: &crate::Global) -> Result<()> {
    let id = parse_tool_id(&options.id)?;
    let link = shelf.try_link(id)?;

    if options.open {
        open_link(link)?;
    }

    if global.json {
        println!("{}", serde_json::json!({ "id": id, "link": link }));
    } else if !options.open {
        println!("{}", link);
    }

    Ok(())
}

/// Hand a URL to the platform's opener
pub fn open_link(url: &str) -> Result<()> {
    let opener = find_opener()?;
    log::debug!("Opening {} with {}", url, opener.display());

    let status = Command::new(&opener)
        .arg(url)
        .status()
        .with_context(|| format!("Failed to run {}", opener.display()))?;

    if !status.success() {
        return Err(eyre!("{} exited with {}", opener.display(), status));
    }
    Ok(())
}

fn find_opener() -> Result<PathBuf> {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["explorer"]
    } else {
        &["xdg-open", "sensible-browser"]
    };

    candidates
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| Error::NoOpener.into())
}
