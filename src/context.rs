//! Opens the on-disk state a command works against.

use jusmile_core::{
    ComboStore, FileDayLogStore, OfflineCache, ReferenceStore, ReqwestClient, ResourceSources,
    SettingsStore, SyncCoordinator,
};
use std::sync::Arc;

use crate::config::Config;

pub struct Context {
    pub config: Config,
    pub store: Arc<ReferenceStore>,
    pub cache: Arc<OfflineCache>,
    pub days: FileDayLogStore,
    pub settings: SettingsStore,
    pub combos: ComboStore,
}

impl Context {
    pub fn open(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(ReferenceStore::open(config.reference_path())?);
        let cache = Arc::new(OfflineCache::open(config.cache_dir())?);
        let days = FileDayLogStore::new(config.days_dir());
        let settings = SettingsStore::new(config.settings_path());
        let combos = ComboStore::new(config.combos_path());
        Ok(Self {
            config,
            store,
            cache,
            days,
            settings,
            combos,
        })
    }

    pub fn sources(&self) -> ResourceSources {
        ResourceSources::new(
            self.config.base_url.value.clone(),
            self.config.sources.clone(),
        )
    }

    pub fn coordinator(&self) -> Result<SyncCoordinator<ReqwestClient>, Box<dyn std::error::Error>> {
        let client = Arc::new(ReqwestClient::new()?);
        Ok(SyncCoordinator::new(
            client,
            self.cache.clone(),
            self.store.clone(),
            self.sources(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, ConfigValue};
    use jusmile_core::{DayLogStore, DEFAULT_GENERATION};
    use tempfile::tempdir;

    #[test]
    fn test_open_fresh_data_dir() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap();
        config.data_dir = ConfigValue::new(temp_dir.path().join("data"), ConfigSource::File);

        let ctx = Context::open(config).unwrap();
        assert!(ctx.store.sync_state().is_none());
        assert!(ctx.store.snapshot().tables.precise.get("吐司", "片").is_some());
        assert_eq!(ctx.cache.active_generation(), DEFAULT_GENERATION);
        assert!(ctx.days.load_day(jusmile_core::DateKey::today()).foods.is_empty());
        assert!(ctx.combos.load().is_empty());
        assert_eq!(
            ctx.sources().url(jusmile_core::ResourceKind::PreciseItems),
            "http://localhost:5173/ju-smile-calorie-app/data/Food_DB.csv"
        );
    }
}
