//! Response cache entities
//!
//! Keys are a pure function of the command and the first line of its error,
//! so each failure has at most one cached answer.

use crate::core::string::first_line;
use crate::suggestion::Suggestion;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Hex SHA-256 of `command + "::" + first_line(error)`.
pub fn fingerprint(command: &str, error: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(command.as_bytes());
    hasher.update(b"::");
    hasher.update(first_line(error).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One stored answer
///
/// Field names on disk are `cmd`, `error`, `fix`, `timestamp`, `hits`,
/// `last_used`; the fingerprint is the map key and is not stored in the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(skip)]
    pub fingerprint: String,
    #[serde(rename = "cmd")]
    pub command: String,
    /// First line of the original error
    pub error: String,
    /// Rendered suggestion in marker format
    pub fix: String,
    /// Unix seconds
    #[serde(rename = "timestamp")]
    pub created_at: i64,
    #[serde(rename = "last_used", default)]
    pub last_used_at: i64,
    #[serde(default)]
    pub hits: u64,
}

impl CacheEntry {
    pub fn new(command: &str, error: &str, suggestion: &Suggestion, now: i64) -> Self {
        Self {
            fingerprint: fingerprint(command, error),
            command: command.to_string(),
            error: first_line(error).to_string(),
            fix: suggestion.render(),
            created_at: now,
            last_used_at: now,
            hits: 0,
        }
    }

    /// Record a lookup.
    pub fn touch(&mut self, now: i64) {
        self.hits += 1;
        self.last_used_at = now;
    }

    pub fn suggestion(&self) -> Suggestion {
        Suggestion::from_cached_text(&self.fix)
    }
}

/// Summary for `cache stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_hits: u64,
    pub storage_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(
            fingerprint("kubectl get pods", "error: no context"),
            fingerprint("kubectl get pods", "error: no context")
        );
        assert_eq!(fingerprint("ls", "").len(), 64);
    }

    #[test]
    fn test_fingerprint_uses_first_error_line_only() {
        assert_eq!(
            fingerprint("make", "make: *** No rule\nat line 3"),
            fingerprint("make", "make: *** No rule\nat line 9")
        );
        assert_ne!(fingerprint("make", "a\nsame"), fingerprint("make", "b\nsame"));
        assert_ne!(fingerprint("make", "a"), fingerprint("make all", "a"));
    }

    #[test]
    fn test_separator_prevents_boundary_collisions() {
        assert_ne!(fingerprint("ab", "c"), fingerprint("a", "bc"));
    }

    #[test]
    fn test_entry_wire_format() {
        let suggestion = Suggestion::from_completion(
            "✓ git pull --rebase\nRoot: Branch is behind.",
            Model::Qwen3_4B,
            "ollama",
        );
        let mut entry = CacheEntry::new("git push", "rejected\nhint: pull first", &suggestion, 100);
        entry.touch(200);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["cmd"], "git push");
        assert_eq!(json["error"], "rejected");
        assert_eq!(json["fix"], "✓ git pull --rebase\nRoot: Branch is behind.");
        assert_eq!(json["timestamp"], 100);
        assert_eq!(json["last_used"], 200);
        assert_eq!(json["hits"], 1);
        assert!(json.get("fingerprint").is_none());

        assert_eq!(entry.suggestion().command, "git pull --rebase");
    }
}
