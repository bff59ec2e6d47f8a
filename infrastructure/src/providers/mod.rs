//! Backend adapters and the factory that picks one from configuration

pub mod ollama;
pub mod opencode;

pub use ollama::{OllamaBackend, OllamaSettings};
pub use opencode::OpenCodeBackend;

use crate::config::FileConfig;
use shellfix_application::ports::backend::{BackendError, SuggestionBackend};
use shellfix_domain::{Model, ProviderKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Everything needed to build a backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    pub provider: ProviderKind,
    pub preferred_model: Option<Model>,
    pub ollama: OllamaSettings,
    pub opencode_binary: String,
}

impl BackendSettings {
    pub fn from_config(config: &FileConfig) -> Self {
        let (provider, _) = config.parse_provider();
        let (timeout, _) = config.parse_timeout();
        Self {
            provider,
            preferred_model: config.preferred_model(),
            ollama: OllamaSettings {
                base_url: config.ollama.base_url.clone(),
                temperature: config.ollama.temperature,
                context_window: config.ollama.context_window,
                timeout: Duration::from_secs(timeout),
            },
            opencode_binary: config.opencode.binary.clone(),
        }
    }
}

/// Build the configured backend.
pub fn create_backend(
    settings: &BackendSettings,
) -> Result<Arc<dyn SuggestionBackend>, BackendError> {
    debug!("Creating {} backend", settings.provider);
    Ok(match settings.provider {
        ProviderKind::Ollama => Arc::new(
            OllamaBackend::new(settings.ollama.clone())?
                .with_preferred_model(settings.preferred_model.clone()),
        ),
        ProviderKind::OpenCode => Arc::new(
            OpenCodeBackend::new(settings.opencode_binary.clone())
                .with_preferred_model(settings.preferred_model.clone()),
        ),
    })
}
