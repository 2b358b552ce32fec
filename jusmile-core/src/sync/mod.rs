//! Keeping the reference tables fresh.
//!
//! A sync probes the remote version marker, decides whether the local tables
//! are stale, fetches all four resources in parallel and publishes them as
//! one snapshot. Any fetch failure aborts the sync with nothing published.

mod coordinator;
mod error;
mod status;
mod version;

pub use coordinator::{SyncCoordinator, SyncOutcome, SyncReport};
pub use error::SyncError;
pub use status::{SyncPhase, SyncStatus};
pub use version::{probe_version, VersionMarker};
