//! CLI settings - persisted user configuration.
//!
//! Loaded from `settings.toml` in the user's config directory, or from an
//! explicit `--config` path. Every field has a default, so partial files
//! are fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_listing::{DEFAULT_MAX_VISIBLE, DEFAULT_SEARCH_DEBOUNCE};
use shop_persistence::FilePreferenceStore;

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Listing behaviour.
    pub listing: ListingSettings,

    /// Where durable preferences live.
    pub storage: StorageSettings,
}

impl Settings {
    /// Load settings from the default path.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(error = %format!("{e:#}"), "Using default settings");
                }
                Self::default()
            }
        }
    }

    /// Load settings from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse settings file {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Storefront", "Storefront")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Preference store at the configured (or default) location.
    pub fn preference_store(&self) -> FilePreferenceStore {
        match &self.storage.preferences_path {
            Some(path) => FilePreferenceStore::new(path),
            None => FilePreferenceStore::at_default_location(),
        }
    }
}

// =============================================================================
// LISTING SETTINGS
// =============================================================================

/// Listing behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Quiet period before a typed search is applied, in milliseconds.
    pub search_debounce_ms: u64,

    /// Page buttons shown before the pagination bar collapses.
    pub max_visible_pages: u32,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: u64::try_from(DEFAULT_SEARCH_DEBOUNCE.as_millis())
                .unwrap_or(500),
            max_visible_pages: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl ListingSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

// =============================================================================
// STORAGE SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Preferences file (defaults to the platform config directory).
    pub preferences_path: Option<PathBuf>,
}
