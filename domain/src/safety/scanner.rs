//! Destructive-pattern scanner
//!
//! Tool-agnostic last line of defense, run after validation. A finding stops
//! the pipeline: the suggestion is neither cached nor presented.

use serde::{Deserialize, Serialize};

/// How bad a destructive pattern is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A destructive signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DangerPattern {
    pub pattern: &'static str,
    pub description: &'static str,
    pub severity: Severity,
}

const fn danger(
    pattern: &'static str,
    description: &'static str,
    severity: Severity,
) -> DangerPattern {
    DangerPattern {
        pattern,
        description,
        severity,
    }
}

/// Most catastrophic first; the first match is reported.
pub const DANGER_PATTERNS: &[DangerPattern] = &[
    danger("rm -rf /", "recursive deletion of root", Severity::Critical),
    danger("rm -rf *", "recursive deletion of all files", Severity::Critical),
    danger("rm -rf ~", "recursive deletion of home directory", Severity::Critical),
    danger("rm -rf $HOME", "recursive deletion of home directory", Severity::Critical),
    danger("> /dev/sda", "writing to disk device", Severity::Critical),
    danger("dd if=/dev/zero", "disk overwrite", Severity::Critical),
    danger("mkfs.", "filesystem formatting", Severity::Critical),
    danger("DROP DATABASE", "database deletion", Severity::Critical),
    danger("DROP TABLE", "table deletion", Severity::Critical),
    danger("TRUNCATE", "data truncation", Severity::High),
    danger("chmod -R 777", "insecure permissions", Severity::High),
    danger("chmod 777", "insecure permissions", Severity::Medium),
    danger("chown -R", "ownership change (use with caution)", Severity::Medium),
    danger(":(){ :|:& };:", "fork bomb", Severity::Critical),
    danger("--no-preserve-root", "disables root protection", Severity::Critical),
    danger("mv .* /dev/null", "move to null device", Severity::High),
    danger("kubectl delete", "kubernetes resource deletion", Severity::Medium),
    danger("terraform destroy", "infrastructure destruction", Severity::Medium),
];

/// Scan result. A clean result has `is_dangerous == false` and no pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerFinding {
    pub is_dangerous: bool,
    pub matched_pattern: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    /// The scanned command
    pub command: String,
}

impl DangerFinding {
    pub fn clean(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    fn matched(command: &str, pattern: &DangerPattern) -> Self {
        Self {
            is_dangerous: true,
            matched_pattern: Some(pattern.pattern.to_string()),
            description: Some(pattern.description.to_string()),
            severity: Some(pattern.severity),
            command: command.to_string(),
        }
    }

    /// Multi-line warning shown instead of the suggestion. Empty when clean.
    pub fn warning_text(&self) -> String {
        if !self.is_dangerous {
            return String::new();
        }

        format!(
            "🚨 DANGER: Command contains potentially destructive pattern: {}\n\
             ⚠️  This could cause data loss or system damage! ({})\n\
             📋 Command: {}\n\
             \n\
             If you're ABSOLUTELY SURE this is safe, you can:\n  \
             1. Review the command carefully\n  \
             2. Test in a safe environment first\n  \
             3. Execute manually after verification",
            self.matched_pattern.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.command,
        )
    }
}

/// Case-insensitive substring scan over an ordered pattern table
#[derive(Debug, Clone)]
pub struct DangerScanner {
    patterns: Vec<DangerPattern>,
}

impl DangerScanner {
    pub fn new() -> Self {
        Self {
            patterns: DANGER_PATTERNS.to_vec(),
        }
    }

    pub fn with_patterns(patterns: Vec<DangerPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[DangerPattern] {
        &self.patterns
    }

    pub fn scan(&self, command: &str) -> DangerFinding {
        let lowered = command.to_lowercase();

        self.patterns
            .iter()
            .find(|p| lowered.contains(&p.pattern.to_lowercase()))
            .map(|p| DangerFinding::matched(command, p))
            .unwrap_or_else(|| DangerFinding::clean(command))
    }
}

impl Default for DangerScanner {
    fn default() -> Self {
        Self::new()
    }
}
