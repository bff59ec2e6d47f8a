//! Result of validating one suggested command

use serde::{Deserialize, Serialize};

/// Marks a message that must force a re-query
pub const BLOCKED_MARKER: &str = "🚨 BLOCKED";
/// Marks an advisory message
pub const WARNING_MARKER: &str = "⚠️";
const SUGGESTION_MARKER: &str = "💡 Suggestion:";

/// Outcome of a validator run
///
/// The variant decides pipeline behavior: only `Blocking` triggers a
/// re-query. Messages still carry the urgency markers because the confidence
/// scorer and the console output read them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ValidationOutcome {
    #[default]
    Ok,
    Warning(String),
    Blocking(String),
}

impl ValidationOutcome {
    /// Hard stop with a replacement hint, e.g. force-pushing a protected branch.
    pub fn blocked(reason: impl AsRef<str>, suggestion: impl AsRef<str>) -> Self {
        ValidationOutcome::Blocking(format!(
            "{}: {}\n{} {}",
            BLOCKED_MARKER,
            reason.as_ref(),
            SUGGESTION_MARKER,
            suggestion.as_ref()
        ))
    }

    /// Structurally wrong command: unknown flag, unknown subcommand, missing value.
    ///
    /// Blocking, but without the urgent marker.
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationOutcome::Blocking(message.into())
    }

    /// Risky but legitimate operation.
    pub fn warning(message: impl AsRef<str>) -> Self {
        ValidationOutcome::Warning(format!("{}  Warning: {}", WARNING_MARKER, message.as_ref()))
    }

    /// Risky operation with a safer alternative.
    pub fn warning_with_suggestion(message: impl AsRef<str>, suggestion: impl AsRef<str>) -> Self {
        ValidationOutcome::Warning(format!(
            "{}  Warning: {}\n{} {}",
            WARNING_MARKER,
            message.as_ref(),
            SUGGESTION_MARKER,
            suggestion.as_ref()
        ))
    }

    /// Softer note about a likely oversight (missing namespace, inventory...).
    pub fn caution(message: impl AsRef<str>) -> Self {
        ValidationOutcome::Warning(format!("{}  {}", WARNING_MARKER, message.as_ref()))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Ok)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationOutcome::Warning(_))
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, ValidationOutcome::Blocking(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Ok => None,
            ValidationOutcome::Warning(m) | ValidationOutcome::Blocking(m) => Some(m),
        }
    }
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(m) => write!(f, "{}", m),
            None => write!(f, "ok"),
        }
    }
}
