//! helm validator

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, find_hallucination, find_substring, invoked_as,
};
use crate::validation::validator::CommandValidator;
use regex::Regex;

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (
        r"^helm\s+delete\b",
        "'helm delete' is deprecated in Helm 3. Use 'helm uninstall' instead.",
    ),
    (
        r"install --update",
        "helm install does not have --update. Use 'helm upgrade --install' instead.",
    ),
    (
        r"upgrade --force-install",
        "helm upgrade does not have --force-install. Use 'helm upgrade --install' instead.",
    ),
    (
        r"--auto-approve",
        "helm does not have --auto-approve. Helm operations proceed without confirmation by default.",
    ),
    (r"list --sort", "helm list does not have --sort. Use --date or --reverse instead."),
    (r"--force-yes", "helm does not have --force-yes."),
    (
        r"install --dry-run(\s|$)",
        "use --dry-run=client or --dry-run=server, not just --dry-run.",
    ),
    (
        r"repo add --update",
        "helm repo add does not have --update. Run 'helm repo update' separately.",
    ),
    (
        r"--version latest",
        "helm doesn't support 'latest' as a version. Omit --version to get the latest.",
    ),
    (
        r"install --replace",
        "helm install does not have --replace. Use 'helm upgrade --install' instead.",
    ),
];

const SUBCOMMANDS: &[&str] = &[
    "install", "upgrade", "uninstall", "rollback", "list", "history", "status", "get", "create",
    "dependency", "env", "lint", "package", "plugin", "pull", "push", "registry", "repo",
    "search", "show", "template", "test", "verify", "version",
];

const DANGEROUS_OPS: &[&str] = &["uninstall", "rollback"];

/// Kubernetes package manager CLI
#[derive(Debug, Clone)]
pub struct HelmValidator {
    flags: Vec<FlagRule>,
    chart_reference: Option<Regex>,
}

impl HelmValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
            chart_reference: Regex::new(r"(install|upgrade)\s+\S+\s+\S+/\S+").ok(),
        }
    }

    fn dangerous_op(command: &str) -> Option<ValidationOutcome> {
        if command.contains("uninstall") && command.contains("--purge") {
            return Some(ValidationOutcome::warning(
                "The --purge flag is deprecated in Helm 3. Uninstall now purges by default.",
            ));
        }

        find_substring(command, DANGEROUS_OPS).map(|op| {
            ValidationOutcome::warning(format!(
                "Dangerous operation detected: 'helm {}'. This will modify or remove deployed applications.",
                op
            ))
        })
    }

    fn common_mistakes(&self, command: &str) -> Option<ValidationOutcome> {
        let installs = command.contains("install") || command.contains("upgrade");
        if !installs {
            return None;
        }

        if command.contains("helm install") && command.split_whitespace().count() < 4 {
            return Some(ValidationOutcome::invalid(
                "helm install requires: helm install [NAME] [CHART] [flags]",
            ));
        }

        if !command.contains("-n ") && !command.contains("--namespace") {
            return Some(ValidationOutcome::caution(
                "No namespace specified. In Helm 3, releases are namespaced. Add -n <namespace> or use --namespace.",
            ));
        }

        let has_repo_chart = self
            .chart_reference
            .as_ref()
            .is_some_and(|re| re.is_match(command));
        let has_local_chart = command.contains(" ./") || command.contains(" .");
        if !has_repo_chart && !has_local_chart {
            return Some(ValidationOutcome::caution(
                "Chart should be in format: repo/chart or ./local-path. Did you forget 'helm repo add'?",
            ));
        }

        None
    }
}

impl Default for HelmValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for HelmValidator {
    fn name(&self) -> &'static str {
        "helm"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["helm"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = command.trim();

        find_hallucination(&self.flags, command)
            .or_else(|| check_subcommand("helm", command, SUBCOMMANDS))
            .or_else(|| Self::dangerous_op(command))
            .or_else(|| self.common_mistakes(command))
            .unwrap_or_default()
    }
}
