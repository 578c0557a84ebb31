use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::kv::KeyValueStore;

/// Storage key for the colour scheme preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Saved theme, or the default when unset or unreadable
pub fn load_theme(store: &dyn KeyValueStore) -> ThemeMode {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed theme preference");
            ThemeMode::default()
        }),
        Ok(None) => ThemeMode::default(),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Failed to read theme preference");
            ThemeMode::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, theme: ThemeMode) -> Result<()> {
    let raw = serde_json::to_string(&theme).context("Failed to serialize theme")?;
    store.set(THEME_KEY, &raw).context("Failed to persist theme")
}
