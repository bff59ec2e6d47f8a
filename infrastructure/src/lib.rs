//! Infrastructure layer for shellfix
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod cache;
pub mod config;
pub mod providers;

// Re-export commonly used types
pub use cache::JsonFileCache;
pub use config::{ConfigError, ConfigIssue, ConfigLoader, ConfigSource, FileConfig};
pub use providers::{
    BackendSettings, OllamaBackend, OllamaSettings, OpenCodeBackend, create_backend,
};
