use log::debug;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::error::{PredictionError, Result};

struct Entry<T> {
    modified: SystemTime,
    artifact: Arc<T>,
}

/// Read-through cache of loaded artifacts keyed by path.
///
/// An entry is reused only while the file's modification time is unchanged.
pub struct ArtifactCache<T> {
    entries: Mutex<HashMap<PathBuf, Entry<T>>>,
}

impl<T> Default for ArtifactCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> ArtifactCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Entry<T>>> {
        // Entries are replaced whole, a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached artifact for `path`, calling `loader` when the file
    /// is new or has changed since it was cached.
    pub fn get_or_load<F>(&self, path: &Path, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.lock().remove(path);
                return Err(PredictionError::ArtifactMissing(path.to_path_buf()));
            }
            Err(e) => {
                return Err(PredictionError::failure(format!(
                    "failed to stat {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if let Some(entry) = self.lock().get(path) {
            if entry.modified == modified {
                debug!("Artifact cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.artifact));
            }
        }

        debug!("Artifact cache miss for {}", path.display());
        let artifact = Arc::new(loader(path)?);
        self.lock().insert(
            path.to_path_buf(),
            Entry {
                modified,
                artifact: Arc::clone(&artifact),
            },
        );
        Ok(artifact)
    }
}
