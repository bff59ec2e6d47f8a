//! Activation policy: should this invocation run at all?

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How assistance is triggered after a command fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Suggest automatically on every failure
    #[default]
    Auto,
    /// Ask the user what to do first
    Interactive,
    /// Only on explicit request (`ask`, `analyze` invoked by hand)
    Manual,
    /// Never
    Disabled,
}

impl ActivationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationMode::Auto => "auto",
            ActivationMode::Interactive => "interactive",
            ActivationMode::Manual => "manual",
            ActivationMode::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ActivationMode::Auto),
            "interactive" => Ok(ActivationMode::Interactive),
            "manual" => Ok(ActivationMode::Manual),
            "disabled" => Ok(ActivationMode::Disabled),
            other => Err(DomainError::InvalidActivationMode(other.to_string())),
        }
    }
}

/// Global activation mode plus per-tool overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub mode: ActivationMode,
    pub tool_overrides: HashMap<String, ActivationMode>,
}

impl ActivationPolicy {
    pub fn new(mode: ActivationMode) -> Self {
        Self {
            mode,
            tool_overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, tool: impl Into<String>, mode: ActivationMode) -> Self {
        self.tool_overrides.insert(tool.into(), mode);
        self
    }

    /// Effective mode for a tool: its override if present, else the global mode.
    pub fn mode_for(&self, tool: &str) -> ActivationMode {
        self.tool_overrides.get(tool).copied().unwrap_or(self.mode)
    }

    pub fn should_trigger(&self, tool: &str) -> bool {
        self.mode_for(tool) == ActivationMode::Auto
    }

    pub fn should_prompt(&self, tool: &str) -> bool {
        self.mode_for(tool) == ActivationMode::Interactive
    }

    pub fn is_enabled(&self, tool: &str) -> bool {
        self.mode_for(tool) != ActivationMode::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        let policy = ActivationPolicy::default();
        assert!(policy.should_trigger("kubectl"));
        assert!(policy.is_enabled("anything"));
        assert!(!policy.should_prompt("git"));
    }

    #[test]
    fn test_tool_override_wins() {
        let policy = ActivationPolicy::new(ActivationMode::Manual)
            .with_override("kubectl", ActivationMode::Interactive)
            .with_override("rm", ActivationMode::Disabled);
        assert!(policy.should_prompt("kubectl"));
        assert!(!policy.is_enabled("rm"));
        assert_eq!(policy.mode_for("git"), ActivationMode::Manual);
        assert!(!policy.should_trigger("git"));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Interactive".parse::<ActivationMode>().unwrap(), ActivationMode::Interactive);
        assert_eq!(
            "sometimes".parse::<ActivationMode>().unwrap_err(),
            DomainError::InvalidActivationMode("sometimes".to_string())
        );
    }
}
