//! The process-wide reference table store.
//!
//! Readers take an `Arc<ReferenceSnapshot>` and keep using it for as long as
//! they like. A sync builds a complete new snapshot off to the side and
//! publishes it with a single swap, so no reader ever sees tables from two
//! generations at once.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::StoreError;
use super::write_atomic;
use crate::tables::ReferenceTables;

/// When the tables were last replaced and which data version they came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncState {
    pub last_synced_at: DateTime<Utc>,
    pub data_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferenceSnapshot {
    pub tables: ReferenceTables,
    /// `None` until the first successful sync.
    pub sync_state: Option<SyncState>,
}

impl ReferenceSnapshot {
    pub fn builtin() -> Self {
        Self {
            tables: ReferenceTables::builtin(),
            sync_state: None,
        }
    }
}

pub struct ReferenceStore {
    path: PathBuf,
    current: ArcSwap<ReferenceSnapshot>,
}

impl ReferenceStore {
    /// Loads the persisted snapshot, falling back to built-in tables when
    /// there is none or it cannot be decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match Self::load(&path) {
            Ok(Some(snapshot)) => {
                tracing::debug!(path = %path.display(), "Loaded reference snapshot");
                snapshot
            }
            Ok(None) => ReferenceSnapshot::builtin(),
            Err(StoreError::Corrupt(_, e)) => {
                tracing::warn!("Reference snapshot is unreadable ({}); using built-in tables", e);
                ReferenceSnapshot::builtin()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            current: ArcSwap::from_pointee(snapshot),
        })
    }

    fn load(path: &Path) -> Result<Option<ReferenceSnapshot>, StoreError> {
        match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(path.to_path_buf(), e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(path.to_path_buf(), e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<ReferenceSnapshot> {
        self.current.load_full()
    }

    pub fn sync_state(&self) -> Option<SyncState> {
        self.current.load().sync_state.clone()
    }

    /// Persists `snapshot`, then makes it visible to readers. If persisting
    /// fails, the published snapshot is left as it was.
    pub fn publish(&self, snapshot: ReferenceSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|e| StoreError::Corrupt(self.path.clone(), e.to_string()))?;
        write_atomic(&self.path, &bytes)?;
        self.current.store(Arc::new(snapshot));
        Ok(())
    }

    /// Forgets synced data and returns to the built-in tables.
    pub fn reset(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        }
        self.current.store(Arc::new(ReferenceSnapshot::builtin()));
        Ok(())
    }
}
