use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::store::StoreError;

/// Generation used before any version-specific generation is activated.
pub const DEFAULT_GENERATION: &str = "initial";

const ACTIVE_MARKER: &str = "ACTIVE";

/// Generation directories under one root, plus a marker naming the active one.
#[derive(Debug)]
pub struct OfflineCache {
    root: PathBuf,
    active: RwLock<String>,
}

impl OfflineCache {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let marker = root.join(ACTIVE_MARKER);
        let active = match fs::read_to_string(&marker) {
            Ok(name) if !name.trim().is_empty() => sanitize_generation(name.trim()),
            Ok(_) => DEFAULT_GENERATION.to_string(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => DEFAULT_GENERATION.to_string(),
            Err(e) => return Err(StoreError::Io(marker, e)),
        };
        fs::create_dir_all(root.join(&active)).map_err(|e| StoreError::Io(root.clone(), e))?;
        Ok(Self {
            root,
            active: RwLock::new(active),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn active_generation(&self) -> String {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Generation names present on disk, sorted.
    pub fn generations(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(self.root.clone(), e)),
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Creates an empty generation to populate. Returns the sanitized name.
    pub fn stage(&self, generation: &str) -> Result<String, StoreError> {
        let name = sanitize_generation(generation);
        let dir = self.root.join(&name);
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(dir, e))?;
        Ok(name)
    }

    pub fn lookup(&self, generation: &str, key: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(generation, key)).ok()
    }

    /// Stores a response body. Writes into a generation that no longer exists
    /// are dropped so a late store cannot resurrect a deleted generation.
    pub fn store(&self, generation: &str, key: &str, body: &[u8]) -> Result<bool, StoreError> {
        let dir = self.root.join(sanitize_generation(generation));
        if !dir.is_dir() {
            return Ok(false);
        }
        let path = self.entry_path(generation, key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, body).map_err(|e| StoreError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(path, e))?;
        Ok(true)
    }

    /// Makes `generation` active, then deletes every other generation.
    /// Returns how many generations were deleted.
    pub fn activate(&self, generation: &str) -> Result<usize, StoreError> {
        let name = sanitize_generation(generation);
        let dir = self.root.join(&name);
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(dir, e))?;

        let marker = self.root.join(ACTIVE_MARKER);
        crate::store::write_atomic(&marker, name.as_bytes())?;
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = name.clone();

        let mut removed = 0;
        for old in self.generations()? {
            if old == name {
                continue;
            }
            let dir = self.root.join(&old);
            fs::remove_dir_all(&dir).map_err(|e| StoreError::Io(dir, e))?;
            removed += 1;
        }
        tracing::info!(generation = %name, removed, "Activated cache generation");
        Ok(removed)
    }

    /// Deletes a staged generation. The active generation is never removed.
    pub fn discard(&self, generation: &str) -> Result<(), StoreError> {
        let name = sanitize_generation(generation);
        if name == self.active_generation() {
            return Ok(());
        }
        let dir = self.root.join(&name);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(dir, e)),
        }
    }

    /// Removes every generation and starts over with an empty default one.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(self.root.clone(), e)),
        }
        let dir = self.root.join(DEFAULT_GENERATION);
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(dir, e))?;
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = DEFAULT_GENERATION.to_string();
        Ok(())
    }

    fn entry_path(&self, generation: &str, key: &str) -> PathBuf {
        self.root
            .join(sanitize_generation(generation))
            .join(entry_name(key))
    }
}

fn entry_name(key: &str) -> String {
    format!("{}.bin", hex::encode(Sha256::digest(key.as_bytes())))
}

/// Restricts a generation name to `[A-Za-z0-9._-]`.
fn sanitize_generation(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => DEFAULT_GENERATION.to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cache() -> (OfflineCache, TempDir) {
        let temp = TempDir::new().unwrap();
        let cache = OfflineCache::open(temp.path().join("cache")).unwrap();
        (cache, temp)
    }

    #[test]
    fn test_open_defaults_to_initial_generation() {
        let (cache, _temp) = test_cache();
        assert_eq!(cache.active_generation(), DEFAULT_GENERATION);
        assert_eq!(cache.generations().unwrap(), vec![DEFAULT_GENERATION]);
    }

    #[test]
    fn test_store_and_lookup() {
        let (cache, _temp) = test_cache();
        let key = "GET http://h/data/Food_DB.csv?v=1";
        assert!(cache.lookup(DEFAULT_GENERATION, key).is_none());

        assert!(cache.store(DEFAULT_GENERATION, key, b"food,unit\n").unwrap());
        assert_eq!(
            cache.lookup(DEFAULT_GENERATION, key).unwrap(),
            b"food,unit\n".to_vec()
        );
        assert!(cache
            .lookup(DEFAULT_GENERATION, "GET http://h/data/Food_DB.csv?v=2")
            .is_none());
    }

    #[test]
    fn test_store_into_missing_generation_is_dropped() {
        let (cache, _temp) = test_cache();
        assert!(!cache.store("gone", "GET x", b"data").unwrap());
        assert!(!cache.generations().unwrap().contains(&"gone".to_string()));
    }

    #[test]
    fn test_activate_deletes_older_generations() {
        let (cache, _temp) = test_cache();
        cache.store(DEFAULT_GENERATION, "GET a", b"old").unwrap();

        let staged = cache.stage("2025-11-12-2158").unwrap();
        cache.store(&staged, "GET a", b"new").unwrap();
        // Old generation keeps serving until activation.
        assert_eq!(cache.lookup(DEFAULT_GENERATION, "GET a").unwrap(), b"old");

        let removed = cache.activate(&staged).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(cache.active_generation(), "2025-11-12-2158");
        assert_eq!(cache.generations().unwrap(), vec!["2025-11-12-2158"]);
        assert_eq!(cache.lookup(&staged, "GET a").unwrap(), b"new");
    }

    #[test]
    fn test_active_generation_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        {
            let cache = OfflineCache::open(&root).unwrap();
            let staged = cache.stage("v2").unwrap();
            cache.activate(&staged).unwrap();
        }
        let cache = OfflineCache::open(&root).unwrap();
        assert_eq!(cache.active_generation(), "v2");
    }

    #[test]
    fn test_discard_never_removes_active() {
        let (cache, _temp) = test_cache();
        cache.discard(DEFAULT_GENERATION).unwrap();
        assert_eq!(cache.generations().unwrap(), vec![DEFAULT_GENERATION]);

        let staged = cache.stage("v9").unwrap();
        cache.discard(&staged).unwrap();
        assert_eq!(cache.generations().unwrap(), vec![DEFAULT_GENERATION]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let (cache, _temp) = test_cache();
        let staged = cache.stage("v3").unwrap();
        cache.store(&staged, "GET a", b"x").unwrap();
        cache.activate(&staged).unwrap();

        cache.clear().unwrap();
        assert_eq!(cache.active_generation(), DEFAULT_GENERATION);
        assert_eq!(cache.generations().unwrap(), vec![DEFAULT_GENERATION]);
    }

    #[test]
    fn test_entry_name_is_lowercase_sha256_hex() {
        assert_eq!(
            entry_name("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad.bin"
        );
    }

    #[test]
    fn test_sanitize_generation() {
        assert_eq!(sanitize_generation("2025-11-12"), "2025-11-12");
        assert_eq!(sanitize_generation("../etc"), ".._etc");
        assert_eq!(sanitize_generation("v 1/2"), "v_1_2");
        assert_eq!(sanitize_generation(".."), DEFAULT_GENERATION);
    }
}
