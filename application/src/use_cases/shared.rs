//! Shared utilities for use cases.
//!
//! Contains the deadline-bound, cancellable backend query and the validation
//! step used by both the reactive and proactive pipelines.

use crate::ports::backend::{BackendError, SuggestionBackend};
use crate::ports::progress::DecisionProgress;
use crate::use_cases::analyze_failure::AnalyzeError;
use crate::use_cases::decision::DecisionContext;
use shellfix_domain::{Request, Suggestion, ValidationOutcome, ValidatorChain};
use std::time::Duration;
use tracing::debug;

/// Reason recorded when the completion carried no command line.
pub(crate) const EMPTY_SUGGESTION_REASON: &str = "the reply contained no command";

/// Transport message for a query abandoned by the cancellation token.
pub(crate) const CANCELLED_MESSAGE: &str = "operation cancelled";

fn cancelled() -> AnalyzeError {
    BackendError::Transport(CANCELLED_MESSAGE.to_string()).into()
}

fn timed_out(timeout: Duration) -> AnalyzeError {
    BackendError::Transport(format!("backend did not answer within {:?}", timeout)).into()
}

/// Check if cancellation has been requested.
pub(crate) fn check_cancelled(ctx: &DecisionContext) -> Result<(), AnalyzeError> {
    if let Some(token) = ctx.cancellation_token()
        && token.is_cancelled()
    {
        return Err(cancelled());
    }
    Ok(())
}

/// Query the backend once, bounded by `timeout` and the context's cancellation token.
pub(crate) async fn query_with_deadline(
    backend: &dyn SuggestionBackend,
    request: &Request,
    timeout: Duration,
    ctx: &DecisionContext,
    progress: &dyn DecisionProgress,
    attempt: usize,
) -> Result<Suggestion, AnalyzeError> {
    check_cancelled(ctx)?;

    let model = backend.model_for(request);
    debug!(
        "Querying {} with model {} (attempt {})",
        backend.provider(),
        model,
        attempt
    );
    progress.on_query_start(&model, attempt);

    let deadline = tokio::time::timeout(timeout, backend.query(request));
    let result = if let Some(token) = ctx.cancellation_token() {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                progress.on_query_complete(&model, false);
                return Err(cancelled());
            }
            result = deadline => result,
        }
    } else {
        deadline.await
    };

    let outcome = match result {
        Ok(Ok(suggestion)) => Ok(suggestion),
        Ok(Err(e)) => Err(AnalyzeError::Backend(e)),
        Err(_) => Err(timed_out(timeout)),
    };
    progress.on_query_complete(&model, outcome.is_ok());
    outcome
}

/// Validate a suggestion. An empty command is refused like an invalid one.
pub(crate) fn validate_suggestion(
    validators: &ValidatorChain,
    suggestion: &Suggestion,
) -> ValidationOutcome {
    if suggestion.is_empty() {
        return ValidationOutcome::invalid(EMPTY_SUGGESTION_REASON);
    }
    validators.validate(&suggestion.command)
}
