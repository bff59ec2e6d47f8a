//! Activation configuration from TOML (`[activation]` section)

use crate::config::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use shellfix_domain::{ActivationMode, ActivationPolicy};
use std::collections::BTreeMap;

const VALID_MODES: &[&str] = &["auto", "interactive", "manual", "disabled"];

/// Raw activation configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileActivationConfig {
    /// Global mode
    pub mode: String,
    /// Per-tool overrides, e.g. `kubectl = "interactive"`
    pub tools: BTreeMap<String, String>,
}

impl Default for FileActivationConfig {
    fn default() -> Self {
        Self {
            mode: ActivationMode::default().as_str().to_string(),
            tools: BTreeMap::new(),
        }
    }
}

impl FileActivationConfig {
    /// Build the policy. Unknown modes fall back (global → auto, override → dropped).
    pub fn to_policy(&self) -> (ActivationPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let mode = self.mode.parse::<ActivationMode>().unwrap_or_else(|_| {
            issues.push(ConfigIssue::invalid_enum(
                "activation.mode",
                &self.mode,
                VALID_MODES,
                ActivationMode::default().as_str(),
            ));
            ActivationMode::default()
        });

        let mut policy = ActivationPolicy::new(mode);
        for (tool, value) in &self.tools {
            match value.parse::<ActivationMode>() {
                Ok(tool_mode) => policy = policy.with_override(tool.clone(), tool_mode),
                Err(_) => issues.push(ConfigIssue::invalid_enum(
                    &format!("activation.tools.{}", tool),
                    value,
                    VALID_MODES,
                    mode.as_str(),
                )),
            }
        }

        (policy, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_parse() {
        let config: FileActivationConfig = toml::from_str(
            r#"
mode = "manual"
[tools]
kubectl = "interactive"
rm = "disabled"
"#,
        )
        .unwrap();
        let (policy, issues) = config.to_policy();
        assert!(issues.is_empty());
        assert_eq!(policy.mode, ActivationMode::Manual);
        assert!(policy.should_prompt("kubectl"));
        assert!(!policy.is_enabled("rm"));
    }

    #[test]
    fn test_unknown_modes_are_issues() {
        let mut config = FileActivationConfig {
            mode: "sometimes".to_string(),
            ..Default::default()
        };
        config.tools.insert("git".to_string(), "loud".to_string());

        let (policy, issues) = config.to_policy();
        assert_eq!(policy.mode, ActivationMode::Auto);
        assert!(policy.tool_overrides.is_empty());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "activation.mode");
        assert_eq!(issues[1].field, "activation.tools.git");
    }
}
