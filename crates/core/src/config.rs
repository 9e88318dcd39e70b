//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_PATIENT_STORE_PATH;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_path: PathBuf,
    create_store_if_missing: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `store_path` is empty or names an existing
    /// directory.
    pub fn new(store_path: PathBuf, create_store_if_missing: bool) -> PatientResult<Self> {
        if store_path.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patient store path cannot be empty".into(),
            ));
        }

        if store_path.is_dir() {
            return Err(PatientError::InvalidInput(format!(
                "patient store path is a directory: {}",
                store_path.display()
            )));
        }

        Ok(Self {
            store_path,
            create_store_if_missing,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn create_store_if_missing(&self) -> bool {
        self.create_store_if_missing
    }
}

/// Resolve the store path from an optional environment value.
///
/// `None` or an empty/whitespace value falls back to [`DEFAULT_PATIENT_STORE_PATH`].
pub fn store_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENT_STORE_PATH))
}

/// Parse a boolean flag from an optional environment value.
///
/// Accepts `1`, `true`, `yes` and `on` (case-insensitive) as true; anything else is false.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
}
