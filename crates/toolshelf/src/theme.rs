use crate::prelude::*;
use crate::render::renderer_for;
use crate::shelf::Shelf;

#[derive(Debug, clap::Parser)]
#[command(name = "theme")]
#[command(about = "Show or toggle the colour theme")]
pub struct App {
    /// Switch between light and dark
    #[clap(long)]
    toggle: bool,
}

pub fn run(app: App, shelf: &mut Shelf, global: &crate::Global) -> Result<()> {
    let theme = if app.toggle {
        shelf.toggle_theme()?
    } else {
        shelf.theme()
    };

    let mut renderer = renderer_for(global, theme);
    renderer.render_message(&format!("Theme: {}", theme))
}
