use std::sync::Arc;

use crate::fetch::{FetchError, ResourceKind};
use crate::store::StoreError;

/// Why a full sync did not publish. The previously published tables are
/// always left in place.
///
/// Outcomes are handed to every coalesced caller, so store failures are
/// shared behind an `Arc`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    #[error("Sync failed fetching {resource}: {source}")]
    SyncFailed {
        resource: ResourceKind,
        #[source]
        source: FetchError,
    },

    #[error("Failed to precache version marker: {0}")]
    Precache(#[source] FetchError),

    #[error("Failed to persist reference snapshot: {0}")]
    Persist(#[source] Arc<StoreError>),

    #[error("Offline cache error: {0}")]
    Cache(#[source] Arc<StoreError>),
}

impl SyncError {
    pub fn failed(resource: ResourceKind, source: FetchError) -> Self {
        SyncError::SyncFailed { resource, source }
    }

    pub fn persist(source: StoreError) -> Self {
        SyncError::Persist(Arc::new(source))
    }

    pub fn cache(source: StoreError) -> Self {
        SyncError::Cache(Arc::new(source))
    }
}
