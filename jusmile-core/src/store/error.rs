use std::io;
use std::path::PathBuf;

/// Errors reading or writing local state.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// File exists but could not be decoded.
    Corrupt(PathBuf, String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(path, e) => write!(f, "I/O error for {}: {}", path.display(), e),
            StoreError::Corrupt(path, e) => {
                write!(f, "Failed to decode {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(_, e) => Some(e),
            StoreError::Corrupt(_, _) => None,
        }
    }
}
