//! Keyword router: command text → model

use crate::config::ProviderKind;
use crate::core::model::Model;
use crate::request::RequestMode;

/// A keyword → model mapping with a priority
///
/// Keywords are literal substrings of the lower-cased command, or, when they
/// start with `^`, prefixes of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterRule {
    pub keywords: Vec<String>,
    pub model: Model,
    pub priority: u32,
}

impl RouterRule {
    pub fn new(keywords: &[&str], model: Model, priority: u32) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            model,
            priority,
        }
    }

    /// Whether any keyword hits the (already lower-cased) command.
    fn matches(&self, command_lower: &str) -> bool {
        self.keywords.iter().any(|keyword| match keyword.strip_prefix('^') {
            Some(prefix) => command_lower.starts_with(prefix),
            None => command_lower.contains(keyword.as_str()),
        })
    }
}

// Keyword groups shared by both families, highest priority first.
const INFRA: &[&str] = &["kubectl", "helm", "terraform", "terragrunt", "aws", "gcloud", "azure"];
const CONTAINERS_CI: &[&str] = &["docker", "podman", "buildah", "gitlab-ci", "jenkins", "circleci"];
const OBSERVABILITY: &[&str] = &["prometheus", "grafana", "datadog", "kubectl logs", "stern"];
const CONFIG_MGMT: &[&str] = &["ansible", "salt", "puppet"];
const ML_DATA: &[&str] = &[
    "python", "pip", "conda", "poetry", "jupyter", "mlflow", "kubeflow", "ray", "spark",
];
const TRIVIAL_SHELL: &[&str] = &[
    "^cp ", "^mv ", "^rm ", "^mkdir ", "^touch ", "^grep ", "^find ", "^awk ", "^sed ",
];

/// Selects a model for a request
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<RouterRule>,
    /// Used for every proactive request
    high_capability: Model,
    /// Used when no rule matches
    default_model: Model,
}

impl Router {
    /// Router with no rules: everything goes to `default_model`.
    pub fn new(high_capability: Model, default_model: Model) -> Self {
        Self {
            rules: Vec::new(),
            high_capability,
            default_model,
        }
    }

    /// Static rule set for a backend family.
    pub fn for_family(family: ProviderKind) -> Self {
        match family {
            ProviderKind::Ollama => Self::new(Model::Qwen3_8B, Model::Qwen3_4B)
                .with_rule(RouterRule::new(INFRA, Model::Qwen3_8B, 100))
                .with_rule(RouterRule::new(CONTAINERS_CI, Model::Qwen3_8B, 90))
                .with_rule(RouterRule::new(OBSERVABILITY, Model::Qwen3_8B, 80))
                .with_rule(RouterRule::new(CONFIG_MGMT, Model::Qwen3_8B, 70))
                .with_rule(RouterRule::new(ML_DATA, Model::Gemma3_4B, 60))
                .with_rule(RouterRule::new(TRIVIAL_SHELL, Model::Qwen3_1_7B, 50)),
            ProviderKind::OpenCode => Self::new(Model::ClaudeSonnet4, Model::ClaudeHaiku35)
                .with_rule(RouterRule::new(INFRA, Model::ClaudeSonnet4, 100))
                .with_rule(RouterRule::new(CONTAINERS_CI, Model::ClaudeSonnet4, 90))
                .with_rule(RouterRule::new(OBSERVABILITY, Model::ClaudeSonnet4, 80))
                .with_rule(RouterRule::new(CONFIG_MGMT, Model::ClaudeSonnet4, 70))
                .with_rule(RouterRule::new(ML_DATA, Model::ClaudeHaiku35, 60))
                .with_rule(RouterRule::new(TRIVIAL_SHELL, Model::ClaudeHaiku35, 50)),
        }
    }

    pub fn with_rule(mut self, rule: RouterRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Append a rule. Among equal priorities, earlier rules win.
    pub fn add_rule(&mut self, rule: RouterRule) {
        // Stable insert keeps descending priority with insertion order for ties
        let pos = self
            .rules
            .iter()
            .position(|r| r.priority < rule.priority)
            .unwrap_or(self.rules.len());
        self.rules.insert(pos, rule);
    }

    pub fn rules(&self) -> &[RouterRule] {
        &self.rules
    }

    pub fn high_capability_model(&self) -> &Model {
        &self.high_capability
    }

    pub fn default_model(&self) -> &Model {
        &self.default_model
    }

    /// Pick the model for a command.
    ///
    /// Proactive requests always get the high-capability model. Reactive
    /// requests get the model of the highest-priority matching rule, or the
    /// default when nothing matches.
    pub fn select_model(&self, command: &str, mode: RequestMode) -> Model {
        if mode == RequestMode::Proactive {
            return self.high_capability.clone();
        }

        let command_lower = command.to_lowercase();
        let mut best: Option<&RouterRule> = None;

        for rule in &self.rules {
            if let Some(current) = best
                && rule.priority <= current.priority
            {
                // Rules are sorted; nothing below can beat the current pick
                break;
            }
            if rule.matches(&command_lower) {
                best = Some(rule);
            }
        }

        best.map(|r| r.model.clone())
            .unwrap_or_else(|| self.default_model.clone())
    }
}
