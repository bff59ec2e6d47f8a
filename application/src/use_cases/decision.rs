//! Decision results and the per-invocation context they are made in.

use shellfix_domain::{ConfidenceResult, DangerFinding, Suggestion, ValidationOutcome};
use tokio_util::sync::CancellationToken;

/// State scoped to a single invocation
///
/// Passed by reference into every use case; nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct DecisionContext {
    cancellation_token: Option<CancellationToken>,
    session_disabled: bool,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation_token.as_ref()
    }

    /// Turn assistance off for the rest of this invocation.
    pub fn disable_for_session(&mut self) {
        self.session_disabled = true;
    }

    pub fn is_session_disabled(&self) -> bool {
        self.session_disabled
    }
}

/// A suggestion that passed every gate
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedSuggestion {
    pub suggestion: Suggestion,
    pub confidence: ConfidenceResult,
    /// Final validation outcome (`Ok` or advisory for reactive runs)
    pub validation: ValidationOutcome,
    /// Whether the accepted suggestion came from the re-query
    pub requeried: bool,
    /// Set when the cache write failed; the suggestion is still shown
    pub persist_warning: Option<String>,
}

/// One suggestion that validation refused
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedAttempt {
    pub suggestion: Suggestion,
    pub reason: String,
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Accepted(AcceptedSuggestion),
    /// Served from the response cache without querying the backend
    Cached(Suggestion),
    /// Validation blocked every attempt (at most two)
    Rejected(Vec<RejectedAttempt>),
    /// The danger scanner matched; nothing was cached
    Dangerous {
        suggestion: Suggestion,
        finding: DangerFinding,
        confidence: ConfidenceResult,
    },
    /// Assistance was disabled for this invocation
    Skipped,
}

impl Decision {
    /// Process exit code. `passthrough` is returned when nothing ran.
    pub fn exit_code(&self, passthrough: i32) -> i32 {
        match self {
            Decision::Accepted(_) | Decision::Cached(_) => 0,
            Decision::Rejected(_) | Decision::Dangerous { .. } => 1,
            Decision::Skipped => passthrough,
        }
    }

    /// Suggestion to present, if any
    pub fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            Decision::Accepted(accepted) => Some(&accepted.suggestion),
            Decision::Cached(suggestion) => Some(suggestion),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellfix_domain::{DangerScanner, Model};

    fn suggestion() -> Suggestion {
        Suggestion::from_completion("✓ ls -la", Model::Qwen3_4B, "ollama")
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Decision::Cached(suggestion()).exit_code(127), 0);
        assert_eq!(Decision::Rejected(vec![]).exit_code(127), 1);
        assert_eq!(Decision::Skipped.exit_code(127), 127);

        let dangerous = Decision::Dangerous {
            suggestion: suggestion(),
            finding: DangerScanner::new().scan("rm -rf /"),
            confidence: ConfidenceResult::new(100),
        };
        assert_eq!(dangerous.exit_code(2), 1);
        assert!(dangerous.suggestion().is_none());
    }

    #[test]
    fn test_session_disable_is_local() {
        let mut ctx = DecisionContext::new();
        let copy = ctx.clone();
        ctx.disable_for_session();
        assert!(ctx.is_session_disabled());
        assert!(!copy.is_session_disabled());
    }
}
