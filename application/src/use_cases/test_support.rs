//! In-memory doubles for use-case tests.

use crate::ports::backend::{BackendError, SuggestionBackend};
use crate::ports::suggestion_cache::{CacheError, SuggestionCache};
use async_trait::async_trait;
use shellfix_domain::{
    CacheEntry, CacheStats, Model, ProviderKind, Request, Suggestion, fingerprint,
};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Backend that replays a fixed queue of completions
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, BackendError>>>,
    requests: Mutex<Vec<Request>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    pub(crate) fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub(crate) fn failing(error: BackendError) -> Self {
        let backend = Self::new(&[]);
        backend.replies.lock().unwrap().push_back(Err(error));
        backend
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionBackend for ScriptedBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model_for(&self, _request: &Request) -> Model {
        Model::Qwen3_4B
    }

    async fn query(&self, request: &Request) -> Result<Suggestion, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".into())));
        reply.map(|text| Suggestion::from_completion(&text, Model::Qwen3_4B, "mock"))
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn list_models(&self) -> Result<Vec<Model>, BackendError> {
        Ok(vec![Model::Qwen3_4B])
    }
}

/// Cache kept in a map; optionally refuses every write
#[derive(Default)]
pub(crate) struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    fail_writes: bool,
}

impl MemoryCache {
    pub(crate) fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub(crate) fn entry(&self, command: &str, error: &str) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(&fingerprint(command, error)).cloned()
    }
}

impl SuggestionCache for MemoryCache {
    fn get(&self, command: &str, error: &str) -> Option<Suggestion> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.get_mut(&fingerprint(command, error))?;
        entry.touch(0);
        Some(entry.suggestion())
    }

    fn set(&self, command: &str, error: &str, suggestion: &Suggestion) -> Result<(), CacheError> {
        if self.fail_writes {
            return Err(CacheError::Persist {
                path: PathBuf::from("/read-only/cache.json"),
                message: "permission denied".into(),
            });
        }
        let entry = CacheEntry::new(command, error, suggestion, 0);
        self.entries.lock().unwrap().insert(entry.fingerprint.clone(), entry);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap();
        CacheStats {
            entry_count: entries.len(),
            total_hits: entries.values().map(|e| e.hits).sum(),
            storage_path: PathBuf::from("memory"),
        }
    }
}
