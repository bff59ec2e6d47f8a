//! Analyze Failure use case.
//!
//! Reactive pipeline for a command that just failed:
//! cache lookup → query → validate (one re-query on a blocking outcome)
//! → confidence → danger scan → cache write.

use crate::config::BehaviorConfig;
use crate::ports::backend::{BackendError, SuggestionBackend};
use crate::ports::progress::{DecisionProgress, NoProgress};
use crate::ports::suggestion_cache::SuggestionCache;
use crate::use_cases::decision::{AcceptedSuggestion, Decision, DecisionContext, RejectedAttempt};
use crate::use_cases::shared::{query_with_deadline, validate_suggestion};
use shellfix_domain::core::string::truncate;
use shellfix_domain::{DangerScanner, Request, ValidatorChain, command_complexity, confidence};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end an invocation without a decision.
///
/// A deadline or cancellation surfaces as [`BackendError::Transport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Use case for repairing a failed command.
pub struct AnalyzeFailureUseCase {
    backend: Arc<dyn SuggestionBackend>,
    cache: Arc<dyn SuggestionCache>,
    validators: Arc<ValidatorChain>,
    scanner: DangerScanner,
    config: BehaviorConfig,
}

impl AnalyzeFailureUseCase {
    pub fn new(backend: Arc<dyn SuggestionBackend>, cache: Arc<dyn SuggestionCache>) -> Self {
        Self {
            backend,
            cache,
            validators: Arc::new(ValidatorChain::standard()),
            scanner: DangerScanner::new(),
            config: BehaviorConfig::default(),
        }
    }

    pub fn with_validators(mut self, validators: Arc<ValidatorChain>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_scanner(mut self, scanner: DangerScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn execute(
        &self,
        request: &Request,
        ctx: &DecisionContext,
    ) -> Result<Decision, AnalyzeError> {
        self.execute_with_progress(request, ctx, &NoProgress).await
    }

    /// Run the reactive pipeline with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        request: &Request,
        ctx: &DecisionContext,
        progress: &dyn DecisionProgress,
    ) -> Result<Decision, AnalyzeError> {
        if ctx.is_session_disabled() {
            return Ok(Decision::Skipped);
        }

        info!("Analyzing failure of: {}", truncate(request.command(), 100));

        if let Some(cached) = self.cache.get(request.command(), request.error()) {
            info!("Serving suggestion from cache");
            progress.on_cache_hit();
            return Ok(Decision::Cached(cached));
        }

        let timeout = self.config.timeout;
        let backend = self.backend.as_ref();

        let mut suggestion =
            query_with_deadline(backend, request, timeout, ctx, progress, 1).await?;
        let mut outcome = validate_suggestion(&self.validators, &suggestion);
        progress.on_validation(&outcome);
        let mut requeried = false;

        if outcome.is_blocking() {
            let reason = outcome.message().unwrap_or_default().to_string();
            warn!(
                "Suggestion '{}' failed validation, querying again: {}",
                suggestion.command, reason
            );
            progress.on_requery(&reason);

            let retry = request.with_requery_context(&suggestion.command, &reason);
            let second = query_with_deadline(backend, &retry, timeout, ctx, progress, 2).await?;
            let second_outcome = validate_suggestion(&self.validators, &second);
            progress.on_validation(&second_outcome);

            if second_outcome.is_blocking() {
                let second_reason = second_outcome.message().unwrap_or_default().to_string();
                warn!("Re-queried suggestion also failed validation: {}", second_reason);
                return Ok(Decision::Rejected(vec![
                    RejectedAttempt { suggestion, reason },
                    RejectedAttempt {
                        suggestion: second,
                        reason: second_reason,
                    },
                ]));
            }

            suggestion = second;
            outcome = second_outcome;
            requeried = true;
        }

        let complexity = command_complexity(request.command());
        let confidence = confidence::score(&suggestion, &outcome, complexity);

        let finding = self.scanner.scan(&suggestion.command);
        if finding.is_dangerous {
            warn!(
                "Refusing dangerous suggestion ({}): {}",
                finding.description.as_deref().unwrap_or_default(),
                suggestion.command
            );
            return Ok(Decision::Dangerous {
                suggestion,
                finding,
                confidence,
            });
        }

        let stored = self.cache.set(request.command(), request.error(), &suggestion);
        let persist_warning = match stored {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to cache suggestion: {}", e);
                Some(e.to_string())
            }
        };

        info!(
            "Accepted suggestion with {} confidence ({})",
            confidence.tier, confidence.score
        );
        Ok(Decision::Accepted(AcceptedSuggestion {
            suggestion,
            confidence,
            validation: outcome,
            requeried,
            persist_warning,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::shared::{CANCELLED_MESSAGE, EMPTY_SUGGESTION_REASON};
    use crate::use_cases::test_support::{MemoryCache, ScriptedBackend};
    use shellfix_domain::safety::DangerPattern;
    use shellfix_domain::{ConfidenceTier, Severity};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const POD_ERROR: &str = "No resources found in default namespace.";

    fn use_case(backend: &Arc<ScriptedBackend>, cache: &Arc<MemoryCache>) -> AnalyzeFailureUseCase {
        AnalyzeFailureUseCase::new(backend.clone(), cache.clone())
    }

    fn pods_request() -> Request {
        Request::reactive("kubectl get pods", POD_ERROR, 1).unwrap()
    }

    #[tokio::test]
    async fn test_accepts_and_caches_valid_suggestion() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ kubectl get pods -n prod\nRoot: The pods run in the prod namespace.",
        ]));
        let cache = Arc::new(MemoryCache::default());

        let decision = use_case(&backend, &cache)
            .execute(&pods_request(), &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Accepted(accepted) = decision else {
            panic!("expected accepted, got {decision:?}");
        };
        assert_eq!(accepted.suggestion.command, "kubectl get pods -n prod");
        assert_eq!(accepted.confidence.tier, ConfidenceTier::High);
        assert!(!accepted.requeried);
        assert!(accepted.persist_warning.is_none());
        assert_eq!(backend.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_single_requery_then_served_from_cache() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ kubectl get pods --memory\nRoot: Memory flag shows usage.",
            "✓ kubectl top pods\nRoot: Resource usage comes from the metrics API.",
        ]));
        let cache = Arc::new(MemoryCache::default());
        let uc = use_case(&backend, &cache);
        let ctx = DecisionContext::new();

        let decision = uc.execute(&pods_request(), &ctx).await.unwrap();
        let Decision::Accepted(accepted) = decision else {
            panic!("expected accepted, got {decision:?}");
        };
        assert!(accepted.requeried);
        assert_eq!(accepted.suggestion.command, "kubectl top pods");
        assert_eq!(backend.calls(), 2);

        let requests = backend.requests();
        assert!(requests[0].extra_context().is_none());
        let context = requests[1].extra_context().unwrap();
        assert!(context.starts_with("Previous suggestion 'kubectl get pods --memory' was invalid:"));
        assert_eq!(requests[1].command(), "kubectl get pods");

        let entry = cache.entry("kubectl get pods", POD_ERROR).unwrap();
        assert!(entry.fix.starts_with("✓ kubectl top pods"));

        let again = uc.execute(&pods_request(), &ctx).await.unwrap();
        assert_eq!(again.suggestion().unwrap().command, "kubectl top pods");
        assert!(matches!(again, Decision::Cached(_)));
        assert_eq!(backend.calls(), 2);
        assert_eq!(cache.entry("kubectl get pods", POD_ERROR).unwrap().hits, 1);
    }

    #[tokio::test]
    async fn test_second_blocking_outcome_is_terminal() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ kubectl get pods --memory\nRoot: Shows memory.",
            "✓ kubectl get pods --cpu\nRoot: Shows cpu.",
            "✓ kubectl get pods\nRoot: never asked for.",
        ]));
        let cache = Arc::new(MemoryCache::default());

        let decision = use_case(&backend, &cache)
            .execute(&pods_request(), &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Rejected(attempts) = &decision else {
            panic!("expected rejected, got {decision:?}");
        };
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].suggestion.command, "kubectl get pods --memory");
        assert_eq!(attempts[1].suggestion.command, "kubectl get pods --cpu");
        assert!(!attempts[1].reason.is_empty());
        assert_eq!(backend.calls(), 2);
        assert_eq!(cache.len(), 0);
        assert_eq!(decision.exit_code(1), 1);
    }

    #[tokio::test]
    async fn test_empty_replies_are_rejected() {
        let backend = Arc::new(ScriptedBackend::new(&["Let me think.", "Sure! Here is"]));
        let cache = Arc::new(MemoryCache::default());

        let decision = use_case(&backend, &cache)
            .execute(&pods_request(), &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Rejected(attempts) = decision else {
            panic!("expected rejected");
        };
        assert!(attempts.iter().all(|a| a.reason == EMPTY_SUGGESTION_REASON));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_dangerous_suggestion_is_not_cached() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ rm -rf / --no-preserve-root\nRoot: The build directory is stale.",
        ]));
        let cache = Arc::new(MemoryCache::default());
        let request = Request::reactive("rm build", "rm: build: is a directory", 1).unwrap();

        let decision = use_case(&backend, &cache)
            .execute(&request, &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Dangerous { finding, .. } = &decision else {
            panic!("expected dangerous, got {decision:?}");
        };
        assert_eq!(finding.severity, Some(Severity::Critical));
        assert_eq!(cache.len(), 0);
        assert_eq!(decision.exit_code(1), 1);
    }

    #[tokio::test]
    async fn test_custom_scanner_table() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ make deploy ENV=prod\nRoot: The target environment was not set.",
        ]));
        let cache = Arc::new(MemoryCache::default());
        let request = Request::reactive("make deploy", "missing ENV", 2).unwrap();
        let scanner = DangerScanner::with_patterns(vec![DangerPattern {
            pattern: "ENV=prod",
            description: "production deploy",
            severity: Severity::High,
        }]);

        let decision = use_case(&backend, &cache)
            .with_scanner(scanner)
            .execute(&request, &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Dangerous { finding, .. } = &decision else {
            panic!("expected dangerous, got {decision:?}");
        };
        assert_eq!(finding.description.as_deref(), Some("production deploy"));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_advisory_outcome_proceeds() {
        let backend = Arc::new(ScriptedBackend::new(&[
            "✓ git reset --hard origin/main\nRoot: Local history diverged from the remote.",
        ]));
        let cache = Arc::new(MemoryCache::default());
        let request =
            Request::reactive("git pull", "fatal: Not possible to fast-forward", 128).unwrap();

        let decision = use_case(&backend, &cache)
            .execute(&request, &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Accepted(accepted) = decision else {
            panic!("expected accepted");
        };
        assert!(accepted.validation.is_warning());
        assert_eq!(accepted.confidence.score, 80);
        assert_eq!(backend.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_failure_is_only_a_warning() {
        let backend = Arc::new(ScriptedBackend::new(&["✓ ls -la\nRoot: Hidden files need -a."]));
        let cache = Arc::new(MemoryCache::read_only());
        let request = Request::reactive("ls -z", "ls: invalid option -- 'z'", 2).unwrap();

        let decision = use_case(&backend, &cache)
            .execute(&request, &DecisionContext::new())
            .await
            .unwrap();

        let Decision::Accepted(accepted) = decision else {
            panic!("expected accepted");
        };
        assert!(accepted.persist_warning.unwrap().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_fatal() {
        let backend = Arc::new(ScriptedBackend::failing(BackendError::Unavailable(
            "connection refused".into(),
        )));
        let cache = Arc::new(MemoryCache::default());

        let result = use_case(&backend, &cache)
            .execute(&pods_request(), &DecisionContext::new())
            .await;

        assert_eq!(
            result.unwrap_err(),
            AnalyzeError::Backend(BackendError::Unavailable("connection refused".into()))
        );
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_timeout() {
        let backend = Arc::new(
            ScriptedBackend::new(&["✓ ls\nRoot: late."]).with_delay(Duration::from_millis(500)),
        );
        let cache = Arc::new(MemoryCache::default());
        let config = BehaviorConfig {
            timeout: Duration::from_millis(20),
        };

        let result = use_case(&backend, &cache)
            .with_config(config)
            .execute(&pods_request(), &DecisionContext::new())
            .await;

        assert_eq!(
            result.unwrap_err(),
            AnalyzeError::Backend(BackendError::Transport(
                "backend did not answer within 20ms".to_string()
            ))
        );
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_cancellation_during_query() {
        let backend = Arc::new(
            ScriptedBackend::new(&["✓ ls\nRoot: late."]).with_delay(Duration::from_secs(5)),
        );
        let cache = Arc::new(MemoryCache::default());
        let token = CancellationToken::new();
        let ctx = DecisionContext::new().with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let result = use_case(&backend, &cache).execute(&pods_request(), &ctx).await;
        canceller.await.unwrap();

        assert_eq!(
            result.unwrap_err(),
            AnalyzeError::Backend(BackendError::Transport(CANCELLED_MESSAGE.to_string()))
        );
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_session_disabled_skips_everything() {
        let backend = Arc::new(ScriptedBackend::new(&["✓ ls\nRoot: unused."]));
        let cache = Arc::new(MemoryCache::default());
        let mut ctx = DecisionContext::new();
        ctx.disable_for_session();

        let decision = use_case(&backend, &cache).execute(&pods_request(), &ctx).await.unwrap();

        assert_eq!(decision, Decision::Skipped);
        assert_eq!(decision.exit_code(7), 7);
        assert_eq!(backend.calls(), 0);
    }
}
