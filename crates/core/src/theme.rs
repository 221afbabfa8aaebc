use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StoreError};

/// Storage key holding the theme name
pub const THEME_KEY: &str = "theme";

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than "dark" reads as the default light theme
    pub fn from_stored(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
        match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Unable to read theme, using light: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, store: &mut S) -> Result<(), StoreError> {
        store.set(THEME_KEY, self.as_str())
    }

    /// Flip the persisted theme and return the new one
    pub fn toggle<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Theme, StoreError> {
        let next = Theme::load(store).toggled();
        next.save(store)?;
        Ok(next)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
