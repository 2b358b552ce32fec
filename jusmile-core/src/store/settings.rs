use std::fs;
use std::path::PathBuf;

use super::error::StoreError;
use super::write_atomic;
use crate::models::Settings;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load(&self) -> Settings {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(settings)
            .map_err(|e| StoreError::Corrupt(self.path.clone(), e.to_string()))?;
        write_atomic(&self.path, &bytes)
    }
}
