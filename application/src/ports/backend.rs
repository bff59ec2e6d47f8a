//! Suggestion backend port
//!
//! Defines the interface for asking a language-model backend for a command.

use async_trait::async_trait;
use shellfix_domain::{Model, ProviderKind, Request, Suggestion};
use thiserror::Error;

/// Errors that can occur while querying a backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend cannot be reached (connection refused, binary missing)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The exchange failed after reaching the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The reply envelope could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// A language-model backend
///
/// Implementations (adapters) live in the infrastructure layer. Each one
/// builds the prompt for the request mode, calls its transport and parses the
/// completion. A completion without the success marker is not an error; it
/// yields an empty [`Suggestion`].
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    /// Backend family
    fn provider(&self) -> ProviderKind;

    /// Model this backend would use for the request
    fn model_for(&self, request: &Request) -> Model;

    /// Ask for a suggestion
    async fn query(&self, request: &Request) -> Result<Suggestion, BackendError>;

    /// Lightweight liveness probe, never used on the query path
    async fn is_available(&self) -> bool;

    /// Models the backend can serve
    async fn list_models(&self) -> Result<Vec<Model>, BackendError>;
}
