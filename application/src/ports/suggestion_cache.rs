//! Response cache port

use shellfix_domain::{CacheStats, Suggestion};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when the cache cannot be persisted
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to persist cache to {path}: {message}")]
    Persist { path: PathBuf, message: String },

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fingerprint-keyed store of accepted suggestions
///
/// `get` counts as a use: implementations bump the entry's hit count and
/// last-used time. A store that cannot be read behaves as empty.
pub trait SuggestionCache: Send + Sync {
    fn get(&self, command: &str, error: &str) -> Option<Suggestion>;

    fn set(&self, command: &str, error: &str, suggestion: &Suggestion) -> Result<(), CacheError>;

    fn clear(&self) -> Result<(), CacheError>;

    fn stats(&self) -> CacheStats;
}

/// Cache that never stores anything (`cache.enabled = false`)
pub struct NoCache;

impl SuggestionCache for NoCache {
    fn get(&self, _command: &str, _error: &str) -> Option<Suggestion> {
        None
    }

    fn set(
        &self,
        _command: &str,
        _error: &str,
        _suggestion: &Suggestion,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: 0,
            total_hits: 0,
            storage_path: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellfix_domain::Model;

    #[test]
    fn test_no_cache_never_returns() {
        let suggestion = Suggestion::from_completion("✓ ls -la", Model::Qwen3_4B, "ollama");
        let cache = NoCache;
        cache.set("ls", "err", &suggestion).unwrap();
        assert!(cache.get("ls", "err").is_none());
        assert_eq!(cache.stats().entry_count, 0);
    }
}
