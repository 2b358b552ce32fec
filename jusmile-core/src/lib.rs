//! Ju Smile Core Library
//!
//! Nutrition resolution and the offline reference-data sync engine.

pub mod cache;
pub mod fetch;
pub mod models;
pub mod resolve;
pub mod store;
pub mod sync;
pub mod tables;
pub mod tabular;

pub use cache::{OfflineCache, OfflineClient, DEFAULT_GENERATION};
pub use fetch::{
    FetchError, ReqwestClient, ResourceClient, ResourceKind, ResourceRequest, ResourceSources,
    Response, SourceOverrides, TableFetcher,
};
pub use models::{
    exercise_energy, ComboItem, DateKey, DayData, GoalProgress, LoggedExerciseEntry,
    LoggedFoodEntry, Macros, Meal, MealCombo, Settings, Totals,
};
pub use resolve::{resolve, FoodQuery, LineResult, Resolution, ResolutionSource};
pub use store::{
    ComboStore, DayLogStore, FileDayLogStore, ReferenceSnapshot, ReferenceStore, SettingsStore, StoreError,
    SyncState,
};
pub use sync::{
    SyncCoordinator, SyncError, SyncOutcome, SyncPhase, SyncReport, SyncStatus, VersionMarker,
};
pub use tables::ReferenceTables;
pub use tabular::{ParseError, Row};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
