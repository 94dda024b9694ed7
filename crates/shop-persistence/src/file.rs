//! File-backed preference store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};
use crate::store::PreferenceStore;

/// On-disk shape of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    preferences: BTreeMap<String, String>,
}

/// Preference store persisted as a TOML file.
///
/// Every read goes to disk, so separate handles (or separate processes)
/// pointed at the same path observe each other's writes. Writes replace the
/// file atomically via a temp file + rename.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store preferences at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store preferences in the platform config directory.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the default preferences file path.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Storefront", "Storefront")
            .map(|dirs| dirs.config_dir().join("preferences.toml"))
            .unwrap_or_else(|| PathBuf::from("preferences.toml"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PreferencesFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PreferencesFile::default()),
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(file) => Ok(file),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable preferences file"
                );
                Ok(PreferencesFile::default())
            }
        }
    }

    fn save(&self, file: &PreferencesFile) -> Result<()> {
        let content = toml::to_string_pretty(file)
            .map_err(|e| PersistenceError::Serialization { source: e })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                operation: "create directory for",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.path.with_extension("toml.tmp");
        if let Err(e) = write_temp(&temp_path, content.as_bytes()) {
            // Leave no partial file behind.
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(PersistenceError::AtomicWriteFailed {
                temp_path,
                target_path: self.path.clone(),
                source: e,
            });
        }

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

fn write_temp(temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut temp = File::create(temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    temp.write_all(content).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    temp.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.preferences.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.load()?;
        file.preferences.insert(key.to_string(), value.to_string());
        self.save(&file)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut file = self.load()?;
        if file.preferences.remove(key).is_some() {
            self.save(&file)?;
        }
        Ok(())
    }
}
