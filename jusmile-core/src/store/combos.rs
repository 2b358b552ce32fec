use std::fs;
use std::path::PathBuf;

use super::error::StoreError;
use super::write_atomic;
use crate::models::MealCombo;

/// Saved meal combos, kept as one JSON list in save order.
#[derive(Debug, Clone)]
pub struct ComboStore {
    path: PathBuf,
}

impl ComboStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable combos load as an empty list.
    pub fn load(&self) -> Vec<MealCombo> {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, combos: &[MealCombo]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(combos)
            .map_err(|e| StoreError::Corrupt(self.path.clone(), e.to_string()))?;
        write_atomic(&self.path, &bytes)
    }

    /// Appends `combo`. Names may repeat.
    pub fn add(&self, combo: MealCombo) -> Result<(), StoreError> {
        let mut combos = self.load();
        combos.push(combo);
        self.save(&combos)
    }

    /// The most recently saved combo called `name`.
    pub fn find(&self, name: &str) -> Option<MealCombo> {
        let name = name.trim();
        self.load().into_iter().rev().find(|c| c.name == name)
    }
}
