//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like values are kept as strings so that unknown values can be
//! reported as [`ConfigIssue`]s instead of failing the whole load.

mod activation;
mod backends;
mod cache;
mod output;

pub use activation::FileActivationConfig;
pub use backends::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_OLLAMA_URL, DEFAULT_OPENCODE_BINARY, DEFAULT_TEMPERATURE,
    FileOllamaConfig, FileOpenCodeConfig,
};
pub use cache::FileCacheConfig;
pub use output::FileOutputConfig;

use crate::config::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use shellfix_domain::{Model, ProviderKind};

const VALID_PROVIDERS: &[&str] = &["ollama", "opencode"];
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend family: `ollama` or `opencode`
    pub provider: String,
    /// Overrides router selection when set
    pub preferred_model: Option<String>,
    /// Deadline for one backend query
    pub timeout_seconds: u64,
    pub activation: FileActivationConfig,
    pub ollama: FileOllamaConfig,
    pub opencode: FileOpenCodeConfig,
    pub cache: FileCacheConfig,
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default().as_str().to_string(),
            preferred_model: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            activation: FileActivationConfig::default(),
            ollama: FileOllamaConfig::default(),
            opencode: FileOpenCodeConfig::default(),
            cache: FileCacheConfig::default(),
            output: FileOutputConfig::default(),
        }
    }
}

impl FileConfig {
    /// Selected backend family, falling back to Ollama.
    pub fn parse_provider(&self) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.provider.parse::<ProviderKind>() {
            Ok(kind) => (kind, Vec::new()),
            Err(_) => (
                ProviderKind::default(),
                vec![ConfigIssue::invalid_enum(
                    "provider",
                    &self.provider,
                    VALID_PROVIDERS,
                    ProviderKind::default().as_str(),
                )],
            ),
        }
    }

    /// Preferred model, ignoring blank values.
    pub fn preferred_model(&self) -> Option<Model> {
        self.preferred_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .and_then(|m| m.parse().ok())
    }

    /// Query deadline in seconds; zero is replaced by the default.
    pub fn parse_timeout(&self) -> (u64, Vec<ConfigIssue>) {
        if self.timeout_seconds > 0 {
            return (self.timeout_seconds, Vec::new());
        }
        (
            DEFAULT_TIMEOUT_SECONDS,
            vec![ConfigIssue {
                field: "timeout_seconds".to_string(),
                value: self.timeout_seconds.to_string(),
                message: format!(
                    "timeout_seconds: must be positive, falling back to {}",
                    DEFAULT_TIMEOUT_SECONDS
                ),
            }],
        )
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_provider().1);
        issues.extend(self.parse_timeout().1);
        issues.extend(self.activation.to_policy().1);

        let url = &self.ollama.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            issues.push(ConfigIssue {
                field: "ollama.base_url".to_string(),
                value: self.ollama.base_url.clone(),
                message: format!(
                    "ollama.base_url: '{}' is not an http(s) URL",
                    self.ollama.base_url
                ),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellfix_domain::ActivationMode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
provider = "opencode"
preferred_model = "anthropic/claude-sonnet-4-20250514"
timeout_seconds = 30

[activation]
mode = "interactive"

[activation.tools]
terraform = "manual"

[ollama]
base_url = "http://gpu-box:11434"

[opencode]
binary = "/opt/bin/opencode"

[cache]
enabled = false

[output]
show_confidence = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.parse_provider().0, ProviderKind::OpenCode);
        assert_eq!(config.preferred_model(), Some(Model::ClaudeSonnet4));
        assert_eq!(config.parse_timeout().0, 30);
        let (policy, _) = config.activation.to_policy();
        assert_eq!(policy.mode, ActivationMode::Interactive);
        assert_eq!(policy.mode_for("terraform"), ActivationMode::Manual);
        assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
        assert_eq!(config.ollama.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.opencode.binary, "/opt/bin/opencode");
        assert!(!config.cache.enabled);
        assert!(!config.output.show_confidence);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.parse_provider().0, ProviderKind::Ollama);
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.ollama.context_window, 4096);
        assert!(config.cache.enabled);
        assert!(config.preferred_model().is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_blank_preferred_model_is_ignored() {
        let config = FileConfig {
            preferred_model: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.preferred_model().is_none());
    }

    #[test]
    fn test_validate_collects_issues() {
        let config: FileConfig = toml::from_str(
            r#"
provider = "copilot"
timeout_seconds = 0

[activation]
mode = "always"

[ollama]
base_url = "localhost:11434"
"#,
        )
        .unwrap();

        let fields: Vec<_> = config.validate().into_iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec!["provider", "timeout_seconds", "activation.mode", "ollama.base_url"]
        );
    }
}
