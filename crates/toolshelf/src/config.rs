use crate::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use toolshelf_core::query::SortKey;

const APP_DIR: &str = "toolshelf";
const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "storage.json";

/// Optional `config.toml` contents. Every field can also come from flags or env.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalogue JSON replacing the bundled one
    pub catalogue: Option<PathBuf>,
    /// Key-value store file for bookmarks and theme
    pub store: Option<PathBuf>,
    /// Sort key used when a command doesn't pass `--sort`
    pub default_sort: Option<String>,
}

/// Final settings after merging flags, env and the config file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalogue: Option<PathBuf>,
    /// `None` keeps user state in memory
    pub store: Option<PathBuf>,
    pub default_sort: SortKey,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_store_path() -> Option<PathBuf> {
    dirs_next::data_dir().map(|dir| dir.join(APP_DIR).join(STORE_FILE))
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| eyre!("Invalid config: {}", e))
}

/// Read the config file; a missing file is an empty config
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("In config file {}", path.display()))
}

/// Merge sources: flag/env value first, then the config file, then the default
pub fn resolve_settings(
    global: &crate::Global,
    config: Config,
    default_store: Option<PathBuf>,
) -> Result<Settings> {
    let store = if global.ephemeral {
        None
    } else {
        let store = global.store.clone().or(config.store).or(default_store);
        if store.is_none() {
            return Err(eyre!(
                "Unable to determine a data directory. Pass --store or --ephemeral."
            ));
        }
        store
    };

    Ok(Settings {
        catalogue: global.catalogue.clone().or(config.catalogue),
        store,
        default_sort: config
            .default_sort
            .as_deref()
            .map(SortKey::from_key)
            .unwrap_or_default(),
    })
}
