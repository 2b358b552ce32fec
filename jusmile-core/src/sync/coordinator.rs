use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::error::SyncError;
use super::status::{SyncPhase, SyncStatus};
use super::version::{probe_version, VersionMarker};
use crate::cache::{OfflineCache, OfflineClient};
use crate::fetch::{ResourceClient, ResourceKind, ResourceRequest, ResourceSources, TableFetcher};
use crate::store::{ReferenceSnapshot, ReferenceStore, SyncState};
use crate::tables::{
    build_exercise_intensities, build_precise_items, build_type_macros, build_unit_conversions,
    ReferenceTables,
};

/// What a completed full sync published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub data_version: Option<String>,
    pub synced_at: DateTime<Utc>,
    /// Cache generation that served the fetches.
    pub generation: String,
    pub precise_items: usize,
    pub unit_conversions: usize,
    pub type_macros: usize,
    pub exercise_intensities: usize,
    /// True when this caller waited on another caller's sync and is
    /// reporting that sync instead of running its own.
    pub coalesced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Tables already match the remote data version (or no remote version
    /// was available). Carries the local data version.
    UpToDate(Option<String>),
    Synced(SyncReport),
}

/// How one full sync fetches.
#[derive(Debug, Clone)]
struct SyncPlan {
    data_version: Option<String>,
    /// Value for the `v` query parameter, if any.
    cache_buster: Option<String>,
    /// Generation to populate and activate; `None` uses the active one.
    stage: Option<String>,
    force: bool,
    /// The cache buster is unique to this sync, so responses are not kept.
    one_off: bool,
}

/// Runs syncs one at a time and publishes their results to the
/// [`ReferenceStore`].
///
/// Callers that arrive while a sync is in flight wait for it and then return
/// its outcome rather than starting another, so two rapid manual syncs
/// publish exactly one generation.
pub struct SyncCoordinator<C> {
    client: Arc<C>,
    cache: Arc<OfflineCache>,
    store: Arc<ReferenceStore>,
    sources: ResourceSources,
    gate: tokio::sync::Mutex<()>,
    completed: AtomicU64,
    last_outcome: Mutex<Option<Result<SyncReport, SyncError>>>,
    phase: Mutex<SyncPhase>,
}

impl<C: ResourceClient> SyncCoordinator<C> {
    pub fn new(
        client: Arc<C>,
        cache: Arc<OfflineCache>,
        store: Arc<ReferenceStore>,
        sources: ResourceSources,
    ) -> Self {
        let phase = if store.sync_state().is_some() {
            SyncPhase::Synced
        } else {
            SyncPhase::Unsynced
        };
        Self {
            client,
            cache,
            store,
            sources,
            gate: tokio::sync::Mutex::new(()),
            completed: AtomicU64::new(0),
            last_outcome: Mutex::new(None),
            phase: Mutex::new(phase),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn sync_state(&self) -> Option<SyncState> {
        self.store.sync_state()
    }

    pub fn sources(&self) -> &ResourceSources {
        &self.sources
    }

    /// Syncs on first run or when the remote data version changed; otherwise
    /// does nothing. A failed version probe is not an error.
    pub async fn check_and_sync(&self) -> Result<SyncOutcome, SyncError> {
        let ticket = self.completed.load(Ordering::SeqCst);
        let _guard = self.gate.lock().await;
        if let Some(outcome) = self.coalesced(ticket) {
            return outcome.map(SyncOutcome::Synced);
        }

        let remote = self.remote_version().await.map(|m| m.data_version);
        let state = self.store.sync_state();
        let status = SyncStatus::evaluate(state.as_ref(), remote.as_deref());
        tracing::debug!(?status, remote = ?remote, "Evaluated sync status");

        let plan = match status {
            SyncStatus::Current(version) => {
                tracing::info!(version = ?version, "Reference tables are current");
                return Ok(SyncOutcome::UpToDate(version));
            }
            SyncStatus::Stale(version) => SyncPlan {
                data_version: Some(version.clone()),
                cache_buster: Some(version.clone()),
                stage: Some(version),
                force: false,
                one_off: false,
            },
            SyncStatus::Uninitialized => match remote {
                Some(version) => SyncPlan {
                    data_version: Some(version.clone()),
                    cache_buster: Some(version.clone()),
                    stage: Some(version),
                    force: false,
                    one_off: false,
                },
                None => SyncPlan {
                    data_version: None,
                    cache_buster: None,
                    stage: None,
                    force: false,
                    one_off: false,
                },
            },
        };

        self.run(plan).await.map(SyncOutcome::Synced)
    }

    /// Full sync regardless of version, forcing fresh network reads. Each
    /// invocation uses its own cache-busting query value.
    pub async fn manual_sync(&self) -> Result<SyncReport, SyncError> {
        let ticket = self.completed.load(Ordering::SeqCst);
        let _guard = self.gate.lock().await;
        if let Some(outcome) = self.coalesced(ticket) {
            return outcome;
        }

        let remote = self.remote_version().await.map(|m| m.data_version);
        let data_version = remote.or_else(|| self.store.sync_state().and_then(|s| s.data_version));
        let plan = SyncPlan {
            data_version,
            cache_buster: Some(Utc::now().timestamp_millis().to_string()),
            stage: None,
            force: true,
            one_off: true,
        };
        self.run(plan).await
    }

    /// Outcome of a sync that finished while this caller was waiting.
    fn coalesced(&self, ticket: u64) -> Option<Result<SyncReport, SyncError>> {
        if self.completed.load(Ordering::SeqCst) == ticket {
            return None;
        }
        let last = self
            .last_outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()?;
        tracing::debug!("Returning outcome of concurrent sync");
        Some(last.map(|report| SyncReport {
            coalesced: true,
            ..report
        }))
    }

    /// Reads the remote version marker, bypassing every cache.
    pub async fn remote_version(&self) -> Option<VersionMarker> {
        let cache_buster = Utc::now().timestamp_millis().to_string();
        probe_version(self.client.as_ref(), &self.sources.version_url(), &cache_buster).await
    }

    /// Must be called with the gate held.
    async fn run(&self, plan: SyncPlan) -> Result<SyncReport, SyncError> {
        let previous = self.phase();
        self.set_phase(SyncPhase::Syncing);

        let outcome = self.full_sync(&plan).await;
        match &outcome {
            Ok(report) => {
                tracing::info!(
                    version = ?report.data_version,
                    generation = %report.generation,
                    "Reference tables synced"
                );
                self.set_phase(SyncPhase::Synced);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sync failed; keeping current tables");
                self.set_phase(previous);
            }
        }

        *self.last_outcome.lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome.clone());
        self.completed.fetch_add(1, Ordering::SeqCst);
        outcome
    }

    async fn full_sync(&self, plan: &SyncPlan) -> Result<SyncReport, SyncError> {
        let active = self.cache.active_generation();
        let (generation, staged) = match &plan.stage {
            Some(stage) if *stage != active => {
                let name = self
                    .cache
                    .stage(stage)
                    .map_err(SyncError::cache)?;
                (name, true)
            }
            _ => (active, false),
        };

        let result = self.fetch_and_publish(plan, &generation, staged).await;

        if staged {
            match &result {
                Ok(_) => {
                    // Tables are already published; a failed cut-over only
                    // leaves an extra generation on disk.
                    if let Err(e) = self.cache.activate(&generation) {
                        tracing::warn!(error = %e, "Failed to activate cache generation");
                    }
                }
                Err(_) => {
                    if let Err(e) = self.cache.discard(&generation) {
                        tracing::warn!(error = %e, "Failed to discard staged cache generation");
                    }
                }
            }
        }

        result.map(|(tables, state)| SyncReport {
            data_version: state.data_version,
            synced_at: state.last_synced_at,
            generation,
            precise_items: tables.precise.len(),
            unit_conversions: tables.unit_conversions.len(),
            type_macros: tables.type_macros.len(),
            exercise_intensities: tables.exercises.len(),
            coalesced: false,
        })
    }

    async fn fetch_and_publish(
        &self,
        plan: &SyncPlan,
        generation: &str,
        staged: bool,
    ) -> Result<(ReferenceTables, SyncState), SyncError> {
        let client = OfflineClient::new(self.client.clone(), self.cache.clone(), generation);
        let fetcher = TableFetcher::new(client);

        let request = |kind: ResourceKind| {
            let mut request = ResourceRequest::get(self.sources.url(kind));
            if let Some(v) = &plan.cache_buster {
                request = request.with_query("v", v);
            }
            if plan.force {
                request = request.revalidate();
            }
            if plan.one_off {
                request = request.no_store();
            }
            request
        };
        let fetch = |kind: ResourceKind| {
            let request = request(kind);
            let fetcher = &fetcher;
            async move {
                fetcher
                    .fetch_table(&request)
                    .await
                    .map_err(|e| SyncError::failed(kind, e))
            }
        };

        let (precise, units, types, exercises) = futures::try_join!(
            fetch(ResourceKind::PreciseItems),
            fetch(ResourceKind::UnitConversions),
            fetch(ResourceKind::TypeMacros),
            fetch(ResourceKind::ExerciseIntensities),
        )?;

        // A staged generation must also hold its own version marker before
        // it can become active.
        if staged {
            if let Some(version) = &plan.data_version {
                let marker =
                    ResourceRequest::get(self.sources.version_url()).with_query("v", version);
                OfflineClient::new(self.client.clone(), self.cache.clone(), generation)
                    .precache(&[marker])
                    .await
                    .map_err(SyncError::Precache)?;
            }
        }

        let tables = ReferenceTables {
            precise: build_precise_items(&precise),
            unit_conversions: build_unit_conversions(&units),
            type_macros: build_type_macros(&types),
            exercises: build_exercise_intensities(&exercises),
        };
        let state = SyncState {
            last_synced_at: Utc::now(),
            data_version: plan.data_version.clone(),
        };

        self.store
            .publish(ReferenceSnapshot {
                tables: tables.clone(),
                sync_state: Some(state.clone()),
            })
            .map_err(SyncError::persist)?;

        Ok((tables, state))
    }

    fn set_phase(&self, phase: SyncPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }
}
