//! Persistence error types.
//!
//! Storage failures are reported as structured errors with a user-facing
//! message; callers in the listing layer log them and fall back to defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Preference storage error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} preferences file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preferences could not be encoded as TOML.
    #[error("Failed to serialize preferences")]
    Serialization {
        #[source]
        source: toml::ser::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save of preferences")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!(
                    "Could not {} the preferences file at {}",
                    operation,
                    path.display()
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving your preferences.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save preferences to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
