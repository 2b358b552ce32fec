//! On-disk state: the published reference snapshot, day logs, settings and
//! saved meal combos.

mod combos;
mod day_log;
mod error;
mod reference;
mod settings;

pub use combos::ComboStore;
pub use day_log::{DayLogStore, FileDayLogStore};
pub use error::StoreError;
pub use reference::{ReferenceSnapshot, ReferenceStore, SyncState};
pub use settings::SettingsStore;

use std::fs;
use std::path::Path;

/// Writes `bytes` to a sibling temp file and renames it over `path`, so a
/// reader sees either the old or the new contents.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, bytes).map_err(|e| StoreError::Io(tmp.clone(), e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::Io(path.to_path_buf(), e))
}
