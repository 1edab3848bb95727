use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use critter_math_game::{ProgressStore, SavedProgress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Progress kept as a small JSON document on disk.
///
/// A missing file means no progress yet. Unreadable fields fall back to
/// their defaults instead of failing the load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    type Error = FileStoreError;

    fn load(&self) -> Result<Option<SavedProgress>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(SavedProgress::from_json_lenient(&raw))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, progress: &SavedProgress) -> Result<(), Self::Error> {
        let payload = serde_json::to_string_pretty(progress)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| FileStoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, payload).map_err(|source| FileStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
