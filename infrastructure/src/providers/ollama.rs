//! Local inference server backend (Ollama HTTP API)
//!
//! `POST /api/generate` with `stream: false` for queries, `GET /api/tags`
//! for liveness and model listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shellfix_application::ports::backend::{BackendError, SuggestionBackend};
use shellfix_domain::{Model, PromptTemplate, ProviderKind, Request, Router, Suggestion};
use std::time::Duration;
use tracing::debug;

/// Connection and sampling settings
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub temperature: f64,
    pub context_window: u32,
    /// HTTP client timeout
    pub timeout: Duration,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            temperature: 0.7,
            context_window: 4096,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_ctx: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    created_at: String,
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Backend talking to a local Ollama server
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    options: GenerateOptions,
    router: Router,
    preferred_model: Option<Model>,
}

impl OllamaBackend {
    pub fn new(settings: OllamaSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            options: GenerateOptions {
                temperature: settings.temperature,
                num_ctx: settings.context_window,
            },
            router: Router::for_family(ProviderKind::Ollama),
            preferred_model: None,
        })
    }

    /// Pin one model instead of routing per command.
    pub fn with_preferred_model(mut self, model: Option<Model>) -> Self {
        self.preferred_model = model;
        self
    }

    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Transport(format!(
                "ollama returned status {}",
                status.as_u16()
            )));
        }

        response
            .json::<TagsResponse>()
            .await
            .map_err(|e| {
                BackendError::MalformedResponse(format!("failed to decode model list: {}", e))
            })
    }
}

fn map_send_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() {
        BackendError::Unavailable(format!("ollama not reachable: {}", e))
    } else if e.is_timeout() {
        BackendError::Transport(format!("ollama request timed out: {}", e))
    } else {
        BackendError::Transport(format!("failed to send request: {}", e))
    }
}

#[async_trait]
impl SuggestionBackend for OllamaBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model_for(&self, request: &Request) -> Model {
        self.preferred_model
            .clone()
            .unwrap_or_else(|| self.router.select_model(request.command(), request.mode()))
    }

    async fn query(&self, request: &Request) -> Result<Suggestion, BackendError> {
        let model = self.model_for(request);
        let prompt = PromptTemplate::for_request(request);
        debug!("Ollama prompt for {}: {} chars", model, prompt.len());

        let body = GenerateRequest {
            model: model.as_str(),
            prompt: &prompt,
            stream: false,
            options: self.options.clone(),
        };

        let response = self
            .client
            .post(self.endpoint("/api/generate"))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Transport(format!(
                "ollama returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                BackendError::MalformedResponse(format!("failed to decode response: {}", e))
            })?;
        debug!(
            "Ollama reply from {} (created {}, done: {}): {} chars",
            reply.model,
            reply.created_at,
            reply.done,
            reply.response.len()
        );

        Ok(Suggestion::from_completion(
            &reply.response,
            model,
            ProviderKind::Ollama.as_str(),
        ))
    }

    async fn is_available(&self) -> bool {
        self.fetch_tags().await.is_ok()
    }

    async fn list_models(&self) -> Result<Vec<Model>, BackendError> {
        let tags = self.fetch_tags().await?;
        Ok(tags
            .models
            .into_iter()
            .filter_map(|entry| entry.name.parse().ok())
            .collect())
    }
}
