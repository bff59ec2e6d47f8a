//! Console output formatter for decisions

use colored::Colorize;
use shellfix_application::{AcceptedSuggestion, Decision, RejectedAttempt};
use shellfix_domain::{CacheStats, ConfidenceResult, ConfidenceTier, DangerFinding, Suggestion};

/// Formats decisions and status lines for the terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    show_confidence: bool,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self {
            show_confidence: true,
        }
    }
}

impl ConsoleFormatter {
    pub fn new(show_confidence: bool) -> Self {
        Self { show_confidence }
    }

    /// Format any decision. `Skipped` renders as an empty string.
    pub fn decision(&self, decision: &Decision) -> String {
        match decision {
            Decision::Accepted(accepted) => self.accepted(accepted),
            Decision::Cached(suggestion) => Self::cached(suggestion),
            Decision::Rejected(attempts) => Self::rejected(attempts),
            Decision::Dangerous { finding, .. } => Self::danger(finding),
            Decision::Skipped => String::new(),
        }
    }

    /// The `✓ / Root: / Tip:` block; empty fields are omitted.
    pub fn suggestion(suggestion: &Suggestion) -> String {
        let mut lines = Vec::new();
        if !suggestion.command.is_empty() {
            lines.push(format!("✓ {}", suggestion.command).green().bold().to_string());
        }
        if !suggestion.root_cause.is_empty() {
            lines.push(format!("Root: {}", suggestion.root_cause).cyan().to_string());
        }
        if !suggestion.tip.is_empty() {
            lines.push(format!("Tip: {}", suggestion.tip).yellow().to_string());
        }
        lines.join("\n")
    }

    pub fn cached(suggestion: &Suggestion) -> String {
        format!(
            "{}\n{}",
            "💾 [Cached]".magenta().bold(),
            Self::suggestion(suggestion)
        )
    }

    pub fn confidence(result: &ConfidenceResult) -> String {
        let line = format!(
            "Confidence: {} {} ({}%)",
            result.tier.emoji(),
            result.tier,
            result.score
        );
        match result.tier {
            ConfidenceTier::High => line.green().to_string(),
            ConfidenceTier::Medium => line.yellow().to_string(),
            ConfidenceTier::Low => line.red().to_string(),
        }
    }

    fn accepted(&self, accepted: &AcceptedSuggestion) -> String {
        let mut output = Vec::new();

        if let Some(message) = accepted.validation.message() {
            output.push(Self::warning(&format!("Validation: {}", message)));
        }
        output.push(Self::suggestion(&accepted.suggestion));
        if self.show_confidence {
            output.push(Self::confidence(&accepted.confidence));
        }
        if let Some(warning) = &accepted.persist_warning {
            output.push(Self::warning(&format!("Failed to cache response: {}", warning)));
        }

        output.join("\n")
    }

    pub fn danger(finding: &DangerFinding) -> String {
        let severity = finding
            .severity
            .map(|s| s.to_string())
            .unwrap_or_default();
        format!(
            "{} {}\n{}",
            " DANGER ".red().bold().on_red(),
            finding.warning_text().red().bold(),
            format!("Severity: {}", severity).red()
        )
    }

    pub fn rejected(attempts: &[RejectedAttempt]) -> String {
        let mut output = vec![Self::error("AI kept suggesting invalid commands")];
        for (i, attempt) in attempts.iter().enumerate() {
            let command = if attempt.suggestion.command.is_empty() {
                "(no command)"
            } else {
                attempt.suggestion.command.as_str()
            };
            output.push(format!("  {} {}", format!("[{}]", i + 1).yellow(), command));
            output.push(format!("      {}", attempt.reason.dimmed()));
        }
        output.join("\n")
    }

    pub fn cache_stats(stats: &CacheStats) -> String {
        format!(
            "{}\n  {} {}\n  {} {}\n  {} {}",
            "📊 Cache Statistics:".cyan().bold(),
            "Total patterns:".yellow(),
            stats.entry_count.to_string().green(),
            "Total hits:".yellow(),
            stats.total_hits.to_string().green(),
            "Cache file:".yellow(),
            stats.storage_path.display().to_string().blue()
        )
    }

    pub fn generating(query: &str) -> String {
        format!("{}{}", "🤖 Generating command for: ".cyan().bold(), query.yellow())
    }

    pub fn success(message: &str) -> String {
        format!("✅ {}", message).green().to_string()
    }

    pub fn error(message: &str) -> String {
        format!("❌ {}", message).red().to_string()
    }

    pub fn warning(message: &str) -> String {
        format!("⚠️  {}", message).yellow().to_string()
    }

    pub fn info(message: &str) -> String {
        format!("ℹ️  {}", message).cyan().to_string()
    }
}
