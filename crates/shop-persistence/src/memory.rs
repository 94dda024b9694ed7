//! In-memory preference store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::store::PreferenceStore;

/// Preference store backed by a shared in-memory map.
///
/// Cloning the store hands out another handle to the same map, which is how
/// several listing views in one process share a preference.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
