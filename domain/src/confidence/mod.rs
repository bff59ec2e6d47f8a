//! Heuristic confidence scoring for suggestions

use crate::suggestion::Suggestion;
use crate::validation::{BLOCKED_MARKER, ValidationOutcome, WARNING_MARKER};
use serde::{Deserialize, Serialize};

/// Confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// 90 and above
    High,
    /// 70 to 89
    Medium,
    /// Below 70
    Low,
}

impl ConfidenceTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ConfidenceTier::High,
            70..=89 => ConfidenceTier::Medium,
            _ => ConfidenceTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "✅",
            ConfidenceTier::Medium => "⚠️",
            ConfidenceTier::Low => "❓",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score in `[0, 100]` and its tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    pub score: u8,
    pub tier: ConfidenceTier,
}

impl ConfidenceResult {
    pub fn new(score: u8) -> Self {
        let score = score.min(100);
        Self {
            score,
            tier: ConfidenceTier::from_score(score),
        }
    }
}

/// Rate a suggestion.
///
/// Starts at 100; every check subtracts independently, then the total is
/// clamped to `[0, 100]`. `complexity` is [`command_complexity`] of the
/// command being repaired.
pub fn score(
    suggestion: &Suggestion,
    outcome: &ValidationOutcome,
    complexity: usize,
) -> ConfidenceResult {
    let mut score: i32 = 100;

    if let Some(message) = outcome.message() {
        score -= if message.contains(BLOCKED_MARKER) {
            50
        } else if message.contains(WARNING_MARKER) {
            20
        } else {
            30
        };
    }

    let command = suggestion.command.trim();
    if command.is_empty() {
        score -= 50;
    }
    // Shape checks stack on top of the empty penalty
    if !command.contains(char::is_whitespace) {
        score -= 10;
    }
    if command.contains("...") || command.contains('<') || command.contains('[') {
        score -= 20;
    }

    let root_len = suggestion.root_cause.trim().chars().count();
    if root_len == 0 {
        score -= 15;
    } else if root_len < 10 {
        score -= 10;
    }

    if complexity > 5 {
        score -= 15;
    } else if complexity > 3 {
        score -= 10;
    }

    ConfidenceResult::new(score.clamp(0, 100) as u8)
}

/// Count of shell machinery in a command: pipes, redirections, flag
/// introducers, `&&`/`||`, and subshell openers.
pub fn command_complexity(command: &str) -> usize {
    const TOKENS: &[&str] = &["|", ">", "<", " -", " --", "&&", "||", "$(", "`"];
    TOKENS.iter().map(|t| command.matches(t).count()).sum()
}
