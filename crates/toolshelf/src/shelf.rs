use crate::config::{self, Settings};
use crate::prelude::{eprintln, *};
use std::fs;
use toolshelf_core::bookmarks::BookmarkStore;
use toolshelf_core::catalogue::{Catalogue, ToolId, ToolRecord};
use toolshelf_core::query::{QueryState, SortKey};
use toolshelf_core::session::Session;
use toolshelf_core::storage::{FileStore, KeyValueStore, MemoryStore};
use toolshelf_core::theme::Theme;

const BUNDLED_CATALOGUE: &str = include_str!("../data/tools.json");

/// Everything a command needs: the catalogue and the persisted user state
pub struct Shelf {
    pub catalogue: Catalogue,
    pub bookmarks: BookmarkStore,
    pub default_sort: SortKey,
    store: Box<dyn KeyValueStore>,
}

impl Shelf {
    pub fn open(global: &crate::Global) -> Result<Self> {
        let config_path = global.config.clone().or_else(config::default_config_path);
        let file_config = match &config_path {
            Some(path) => config::load_config(path)?,
            None => config::Config::default(),
        };
        let settings = config::resolve_settings(global, file_config, config::default_store_path())?;

        if global.verbose {
            eprintln!("Catalogue: {}", describe_catalogue(&settings));
            match &settings.store {
                Some(path) => eprintln!("Store: {}", path.display()),
                None => eprintln!("Store: in memory"),
            }
            eprintln!();
        }

        let catalogue = load_catalogue(&settings)?;
        let store: Box<dyn KeyValueStore> = match &settings.store {
            Some(path) => Box::new(FileStore::open(path)),
            None => Box::new(MemoryStore::new()),
        };

        Ok(Self::from_parts(catalogue, store, settings.default_sort))
    }

    pub fn from_parts(
        catalogue: Catalogue,
        store: Box<dyn KeyValueStore>,
        default_sort: SortKey,
    ) -> Self {
        let bookmarks = BookmarkStore::load(&*store);
        Self {
            catalogue,
            bookmarks,
            default_sort,
            store,
        }
    }

    /// A fresh browsing session using the configured default sort
    pub fn session(&self) -> Session {
        Session::with_query(QueryState {
            sort_key: self.default_sort,
            ..QueryState::default()
        })
    }

    pub fn tool(&self, id: ToolId) -> Result<&ToolRecord> {
        self.catalogue
            .get(id)
            .ok_or_else(|| Error::ToolNotFound(id).into())
    }

    pub fn try_link(&self, id: ToolId) -> Result<&str> {
        let tool = self.tool(id)?;
        self.catalogue
            .try_link(tool.id)
            .ok_or_else(|| Error::NoTryLink(id).into())
    }

    /// Bookmarked tools in catalogue order
    pub fn bookmarked_tools(&self) -> Vec<ToolRecord> {
        self.catalogue
            .tools()
            .iter()
            .filter(|tool| self.bookmarks.contains(tool.id))
            .cloned()
            .collect()
    }

    /// Toggle a bookmark on a known tool; returns whether it is now bookmarked
    pub fn toggle_bookmark(&mut self, id: ToolId) -> Result<bool> {
        self.tool(id)?;
        let bookmarked = self
            .bookmarks
            .toggle(&mut *self.store, id)
            .context("Failed to save bookmarks")?;
        Ok(bookmarked)
    }

    pub fn theme(&self) -> Theme {
        Theme::load(&*self.store)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        Theme::toggle(&mut *self.store).context("Failed to save theme")
    }
}

fn describe_catalogue(settings: &Settings) -> String {
    settings
        .catalogue
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "bundled".to_string())
}

fn load_catalogue(settings: &Settings) -> Result<Catalogue> {
    match &settings.catalogue {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalogue {}", path.display()))?;
            Catalogue::from_json(&contents)
                .with_context(|| format!("Failed to load catalogue {}", path.display()))
        }
        None => Catalogue::from_json(BUNDLED_CATALOGUE).context("Bundled catalogue is invalid"),
    }
}

/// Parse a tool id typed by the user
pub fn parse_tool_id(input: &str) -> Result<ToolId> {
    input
        .trim()
        .parse::<ToolId>()
        .map_err(|_| Error::InvalidToolId(input.to_string()).into())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use toolshelf_core::bookmarks::BOOKMARKS_KEY;

    pub fn bundled_shelf() -> Shelf {
        Shelf::from_parts(
            Catalogue::from_json(BUNDLED_CATALOGUE).unwrap(),
            Box::new(MemoryStore::new()),
            SortKey::Popularity,
        )
    }

    #[test]
    fn test_bundled_catalogue_loads() {
        let shelf = bundled_shelf();
        assert_eq!(shelf.catalogue.len(), 14);
        assert!(shelf.bookmarks.is_empty());
    }

    #[test]
    fn test_from_parts_hydrates_bookmarks() {
        let store = MemoryStore::new().with_entry(BOOKMARKS_KEY, "[2, 5]");
        let shelf = Shelf::from_parts(
            Catalogue::from_json(BUNDLED_CATALOGUE).unwrap(),
            Box::new(store),
            SortKey::Name,
        );

        let names: Vec<String> = shelf
            .bookmarked_tools()
            .into_iter()
            .map(|tool| tool.name)
            .collect();
        assert_eq!(names, vec!["Vite", "Playwright"]);
        assert_eq!(shelf.session().query().sort_key, SortKey::Name);
    }

    #[test]
    fn test_toggle_bookmark_unknown_tool() {
        let mut shelf = bundled_shelf();
        assert!(shelf.toggle_bookmark(999).is_err());
        assert!(shelf.bookmarks.is_empty());
    }

    #[test]
    fn test_toggle_bookmark_round_trip() {
        let mut shelf = bundled_shelf();
        assert!(shelf.toggle_bookmark(3).unwrap());
        assert!(shelf.bookmarks.contains(3));
        assert!(!shelf.toggle_bookmark(3).unwrap());
        assert!(shelf.bookmarks.is_empty());
    }

    #[test]
    fn test_try_link() {
        let shelf = bundled_shelf();
        assert_eq!(shelf.try_link(2).unwrap(), "https://vitejs.dev");
        // Postman ships without a link
        assert!(shelf.try_link(14).is_err());
        assert!(shelf.try_link(999).is_err());
    }

    #[test]
    fn test_toggle_theme() {
        let mut shelf = bundled_shelf();
        assert_eq!(shelf.theme(), Theme::Light);
        assert_eq!(shelf.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(shelf.theme(), Theme::Dark);
    }

    #[test]
    fn test_parse_tool_id() {
        assert_eq!(parse_tool_id(" 12 ").unwrap(), 12);
        assert!(parse_tool_id("twelve").is_err());
        assert!(parse_tool_id("-1").is_err());
    }
}
