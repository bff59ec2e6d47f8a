//! Configuration file loading for shellfix
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SHELLFIX_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./shellfix.toml` or `./.shellfix.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/shellfix/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_OLLAMA_URL, DEFAULT_OPENCODE_BINARY, DEFAULT_TEMPERATURE,
    FileActivationConfig, FileCacheConfig, FileConfig, FileOllamaConfig, FileOpenCodeConfig,
    FileOutputConfig,
};
pub use issue::ConfigIssue;
pub use loader::{ConfigError, ConfigLoader, ConfigSource};
