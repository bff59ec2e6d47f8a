//! Suggestion entity produced from a backend completion.

pub mod parsing;

use crate::core::model::Model;
use parsing::{ParsedCompletion, parse_completion, render_completion};
use serde::{Deserialize, Serialize};

/// Default raw confidence reported by backends that do not score themselves
pub const DEFAULT_RAW_CONFIDENCE: f64 = 0.8;

/// Backend identifier used for suggestions served from the response cache
pub const CACHE_BACKEND_ID: &str = "cache";

/// A candidate replacement command
///
/// An empty `command` is a valid but useless result, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub command: String,
    pub root_cause: String,
    pub tip: String,
    /// Model that produced this suggestion (`None` when served from cache)
    pub model: Option<Model>,
    /// Backend that produced this suggestion (`"ollama"`, `"opencode"`, `"cache"`)
    pub backend_id: String,
    pub confidence_raw: f64,
}

impl Suggestion {
    /// Build a suggestion from a raw backend completion.
    pub fn from_completion(text: &str, model: Model, backend_id: impl Into<String>) -> Self {
        Self::from_parsed(parse_completion(text), Some(model), backend_id.into())
    }

    /// Rebuild a suggestion from the rendered text stored in the cache.
    pub fn from_cached_text(text: &str) -> Self {
        Self::from_parsed(parse_completion(text), None, CACHE_BACKEND_ID.to_string())
    }

    fn from_parsed(parsed: ParsedCompletion, model: Option<Model>, backend_id: String) -> Self {
        Self {
            command: parsed.command,
            root_cause: parsed.root_cause,
            tip: parsed.tip,
            model,
            backend_id,
            confidence_raw: DEFAULT_RAW_CONFIDENCE,
        }
    }

    /// Render in the marker format the parser understands.
    pub fn render(&self) -> String {
        render_completion(&self.command, &self.root_cause, &self.tip)
    }

    pub fn is_empty(&self) -> bool {
        self.command.trim().is_empty()
    }

    pub fn is_cached(&self) -> bool {
        self.backend_id == CACHE_BACKEND_ID
    }
}
