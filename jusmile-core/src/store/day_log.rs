use std::fs;
use std::io;
use std::path::PathBuf;

use super::error::StoreError;
use super::write_atomic;
use crate::models::{DateKey, DayData};

/// Per-day log persistence. Resolution results reach it through the caller,
/// never from the engine directly.
pub trait DayLogStore {
    /// Loads a day; a missing or unreadable day is empty.
    fn load_day(&self, key: DateKey) -> DayData;

    fn save_day(&self, key: DateKey, day: &DayData) -> Result<(), StoreError>;
}

/// Stores each day as `day_<YYYY-MM-DD>.json` in one directory.
#[derive(Debug, Clone)]
pub struct FileDayLogStore {
    dir: PathBuf,
}

impl FileDayLogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, key: DateKey) -> PathBuf {
        self.dir.join(format!("day_{}.json", key))
    }
}

impl DayLogStore for FileDayLogStore {
    fn load_day(&self, key: DateKey) -> DayData {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable day log {}: {}", path.display(), e);
                DayData::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => DayData::default(),
            Err(e) => {
                tracing::warn!("Failed to read day log {}: {}", path.display(), e);
                DayData::default()
            }
        }
    }

    fn save_day(&self, key: DateKey, day: &DayData) -> Result<(), StoreError> {
        let path = self.path(key);
        let bytes = serde_json::to_vec_pretty(day)
            .map_err(|e| StoreError::Corrupt(path.clone(), e.to_string()))?;
        write_atomic(&path, &bytes)
    }
}
