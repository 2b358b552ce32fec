//! End-to-end tests: sync into the reference store, then resolve against it.

use async_trait::async_trait;
use jusmile_core::{
    resolve, FetchError, FoodQuery, OfflineCache, ReferenceStore, ResolutionSource,
    ResourceClient, ResourceRequest, ResourceSources, Response, SourceOverrides, SyncCoordinator,
    SyncOutcome,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const BASE: &str = "https://example.test/ju-smile-calorie-app/";

#[derive(Default)]
struct FakeServer {
    files: Mutex<HashMap<String, String>>,
    down: AtomicBool,
    requests: AtomicUsize,
}

impl FakeServer {
    fn serve(&self, file: &str, body: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(format!("{}data/{}", BASE, file), body.to_string());
    }

    fn remove(&self, file: &str) {
        self.files
            .lock()
            .unwrap()
            .remove(&format!("{}data/{}", BASE, file));
    }
}

#[async_trait]
impl ResourceClient for FakeServer {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        if self.down.load(Ordering::SeqCst) {
            return Err(FetchError::network(&request.url, "unreachable"));
        }
        let path = request.url.split('?').next().unwrap_or(&request.url);
        match self.files.lock().unwrap().get(path) {
            Some(body) => Ok(Response::ok(body.as_bytes().to_vec())),
            None => Ok(Response {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

struct Engine {
    server: Arc<FakeServer>,
    store: Arc<ReferenceStore>,
    cache: Arc<OfflineCache>,
    coordinator: SyncCoordinator<FakeServer>,
    dir: TempDir,
}

fn engine() -> Engine {
    let dir = TempDir::new().unwrap();
    let server = Arc::new(FakeServer::default());
    let store = Arc::new(ReferenceStore::open(dir.path().join("reference.json")).unwrap());
    let cache = Arc::new(OfflineCache::open(dir.path().join("cache")).unwrap());
    let coordinator = SyncCoordinator::new(
        server.clone(),
        cache.clone(),
        store.clone(),
        ResourceSources::new(BASE, SourceOverrides::default()),
    );
    Engine {
        server,
        store,
        cache,
        coordinator,
        dir,
    }
}

fn publish_data(server: &FakeServer, version: &str) {
    server.serve(
        "Food_DB.csv",
        "\u{feff}food,unit,kcal,protein,carb,fat\r\n吐司,片,70,2.3,13.1,0.9\r\n\"起司, 切片\",片,60,4,1,4.5\r\n",
    );
    server.serve(
        "Unit_Map.csv",
        "Food,Unit,PerUnitServings,Type\n白飯,碗,4,全穀雜糧類\n吐司,片,1,全穀雜糧類\n",
    );
    server.serve(
        "Type_Table.csv",
        "type,kcal,protein,carb,fat\n全穀雜糧類,70,2,15,0.5\n",
    );
    server.serve("Exercise_Met.csv", "活動,MET\n快走,4.3\n");
    server.serve(
        "version.json",
        &format!(r#"{{"appVersion":"1.0.0","dataVersion":"{}"}}"#, version),
    );
}

#[tokio::test]
async fn test_synced_tables_resolve_documented_scenarios() {
    let e = engine();
    publish_data(&e.server, "2025-11-12-2158");

    let outcome = e.coordinator.check_and_sync().await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Synced(_)));

    let snapshot = e.store.snapshot();
    let toast = resolve(&FoodQuery::new("吐司", 2.0).with_unit("片"), &snapshot.tables);
    let toast = toast.line().unwrap();
    assert_eq!(toast.source, ResolutionSource::Precise);
    assert_eq!(toast.macros.energy, 140.0);
    assert_eq!(toast.macros.protein, 4.6);
    assert_eq!(toast.macros.carb, 26.2);
    assert_eq!(toast.macros.fat, 1.8);

    let rice = resolve(&FoodQuery::new("白飯", 1.0).with_unit("碗"), &snapshot.tables);
    let rice = rice.line().unwrap();
    assert_eq!(rice.servings, 4.0);
    assert_eq!(rice.macros.energy, 280.0);

    let cheese = resolve(
        &FoodQuery::new("起司, 切片", 1.0).with_unit("片"),
        &snapshot.tables,
    );
    assert_eq!(cheese.line().unwrap().macros.energy, 60.0);
}

#[tokio::test]
async fn test_tables_survive_restart() {
    let e = engine();
    publish_data(&e.server, "v1");
    e.coordinator.check_and_sync().await.unwrap();

    let reopened = ReferenceStore::open(e.dir.path().join("reference.json")).unwrap();
    assert_eq!(*reopened.snapshot(), *e.store.snapshot());
    assert_eq!(
        reopened.sync_state().unwrap().data_version.as_deref(),
        Some("v1")
    );
}

#[tokio::test]
async fn test_failed_sync_keeps_previous_tables_byte_identical() {
    let e = engine();
    publish_data(&e.server, "v1");
    e.coordinator.check_and_sync().await.unwrap();
    let before = std::fs::read(e.store.path()).unwrap();

    publish_data(&e.server, "v2");
    e.server.serve("Food_DB.csv", "food,unit,kcal\n吐司,片,999\n");
    e.server.remove("Type_Table.csv");
    assert!(e.coordinator.check_and_sync().await.is_err());

    assert_eq!(std::fs::read(e.store.path()).unwrap(), before);
    let snapshot = e.store.snapshot();
    assert_eq!(snapshot.tables.precise.get("吐司", "片").unwrap().energy, 70.0);
    assert_eq!(e.cache.active_generation(), "v1");
}

#[tokio::test]
async fn test_offline_startup_keeps_published_tables() {
    let e = engine();
    publish_data(&e.server, "v1");
    e.coordinator.check_and_sync().await.unwrap();

    e.server.down.store(true, Ordering::SeqCst);
    let outcome = e.coordinator.check_and_sync().await.unwrap();
    assert_eq!(outcome, SyncOutcome::UpToDate(Some("v1".to_string())));

    let snapshot = e.store.snapshot();
    let rice = resolve(&FoodQuery::new("白飯", 2.0).with_unit("碗"), &snapshot.tables);
    assert_eq!(rice.line().unwrap().macros.energy, 560.0);

    // A forced sync cannot be answered from the cache.
    let err = e.coordinator.manual_sync().await.unwrap_err();
    assert!(err.to_string().contains("Offline"));
    assert_eq!(*e.store.snapshot(), *snapshot);
}

#[tokio::test]
async fn test_rapid_manual_syncs_publish_once() {
    let e = engine();
    publish_data(&e.server, "v1");

    let (first, second) = tokio::join!(e.coordinator.manual_sync(), e.coordinator.manual_sync());
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_eq!(first.synced_at, second.synced_at);
    assert!(first.coalesced || second.coalesced);
    // One version probe plus the four tables.
    assert_eq!(e.server.requests.load(Ordering::SeqCst), 5);
}
