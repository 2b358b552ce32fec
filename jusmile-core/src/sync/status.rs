use std::fmt;

use crate::store::SyncState;

/// Whether the local tables need a sync, given what is persisted and what
/// the remote version marker says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Never synced.
    Uninitialized,
    /// Synced before, but the remote marker names a different data version.
    Stale(String),
    /// Nothing to do. Carries the local data version, if any.
    Current(Option<String>),
}

impl SyncStatus {
    /// An unavailable remote version never makes synced tables stale.
    pub fn evaluate(state: Option<&SyncState>, remote: Option<&str>) -> Self {
        let Some(state) = state else {
            return SyncStatus::Uninitialized;
        };
        match remote {
            Some(remote) if state.data_version.as_deref() != Some(remote) => {
                SyncStatus::Stale(remote.to_string())
            }
            _ => SyncStatus::Current(state.data_version.clone()),
        }
    }

    pub fn needs_sync(&self) -> bool {
        !matches!(self, SyncStatus::Current(_))
    }
}

/// Lifecycle of the coordinator: `Unsynced → Syncing → Synced`, and back to
/// `Syncing` on every later sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Unsynced,
    Syncing,
    Synced,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Unsynced => write!(f, "unsynced"),
            SyncPhase::Syncing => write!(f, "syncing"),
            SyncPhase::Synced => write!(f, "synced"),
        }
    }
}
