//! Cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw cache configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Cache file; the platform data directory when unset
    pub path: Option<PathBuf>,
    pub enabled: bool,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            enabled: true,
        }
    }
}

impl FileCacheConfig {
    /// Configured path, or `<data_dir>/shellfix/cache.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("shellfix").join("cache.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = FileCacheConfig {
            path: Some(PathBuf::from("/tmp/fixes.json")),
            enabled: true,
        };
        assert_eq!(config.resolved_path(), Some(PathBuf::from("/tmp/fixes.json")));
    }

    #[test]
    fn test_default_path_under_shellfix() {
        if let Some(path) = FileCacheConfig::default().resolved_path() {
            assert!(path.ends_with("shellfix/cache.json"));
        }
    }
}
