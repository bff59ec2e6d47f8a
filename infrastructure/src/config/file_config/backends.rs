//! Backend configuration from TOML (`[ollama]` and `[opencode]` sections)

use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_CONTEXT_WINDOW: u32 = 4096;
pub const DEFAULT_OPENCODE_BINARY: &str = "opencode";

/// Local inference server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    pub base_url: String,
    pub temperature: f64,
    pub context_window: u32,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

/// Agent-process settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenCodeConfig {
    /// Binary name or path
    pub binary: String,
}

impl Default for FileOpenCodeConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_OPENCODE_BINARY.to_string(),
        }
    }
}
