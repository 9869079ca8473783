//! Light/dark preference, persisted as a bare `light`/`dark` string under
//! the `theme` entry.

use std::str::FromStr;

use tracing::warn;

use crate::storage::KeyValueStore;

/// Storage key for the theme preference
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Stored preference, or light when absent or malformed
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.load(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored theme");
                Theme::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        if let Err(e) = store.save(THEME_STORAGE_KEY, self.as_str()) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle control: names the theme it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "Dark",
            Theme::Dark => "Light",
        }
    }
}
