//! Response cache persisted as a single JSON object
//!
//! The whole table is read once when opened and rewritten on every mutation.
//! There is no cross-process locking; the last writer wins.

use shellfix_application::ports::suggestion_cache::{CacheError, SuggestionCache};
use shellfix_domain::{CacheEntry, CacheStats, Suggestion, fingerprint};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

type Entries = BTreeMap<String, CacheEntry>;

/// Fingerprint-keyed cache in a JSON file
pub struct JsonFileCache {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl JsonFileCache {
    /// Open the cache at `path`. A missing or malformed file yields an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        debug!("Loaded {} cache entries from {}", entries.len(), path.display());
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Entries {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Entries::new(),
        };

        match serde_json::from_str::<Entries>(&data) {
            Ok(mut entries) => {
                for (key, entry) in entries.iter_mut() {
                    entry.fingerprint = key.clone();
                }
                entries
            }
            Err(e) => {
                warn!("Ignoring corrupt cache file {}: {}", path.display(), e);
                Entries::new()
            }
        }
    }

    fn persist(&self, entries: &Entries) -> Result<(), CacheError> {
        let to_error = |message: String| CacheError::Persist {
            path: self.path.clone(),
            message,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
        }

        let data = serde_json::to_string_pretty(entries).map_err(|e| to_error(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| to_error(e.to_string()))
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

impl SuggestionCache for JsonFileCache {
    fn get(&self, command: &str, error: &str) -> Option<Suggestion> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get_mut(&fingerprint(command, error))?;
        entry.touch(Self::now());
        let suggestion = entry.suggestion();

        // Best effort: the hit is served even when the write fails
        if let Err(e) = self.persist(&entries) {
            warn!("Failed to record cache hit: {}", e);
        }
        Some(suggestion)
    }

    fn set(&self, command: &str, error: &str, suggestion: &Suggestion) -> Result<(), CacheError> {
        let entry = CacheEntry::new(command, error, suggestion, Self::now());
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(entry.fingerprint.clone(), entry);
        self.persist(&entries)
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.persist(&entries)
    }

    fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            entry_count: entries.len(),
            total_hits: entries.values().map(|e| e.hits).sum(),
            storage_path: self.path.clone(),
        }
    }
}
