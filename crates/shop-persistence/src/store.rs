//! The preference store capability.

use crate::error::Result;

/// Key under which the grid density preference is stored.
pub const LAYOUT_PREFERENCE_KEY: &str = "shop.grid_layout";

/// Durable string key-value storage for user preferences.
///
/// Values are opaque strings; validating them is the caller's job.
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
