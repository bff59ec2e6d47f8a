//! kubectl validator

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, expand_alias, find_hallucination, find_substring,
    invoked_as,
};
use crate::validation::validator::CommandValidator;

const ALIASES: &[(&str, &str)] = &[("k", "kubectl")];

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (r"--sort[\s=]", "kubectl get does not have a --sort flag. Use --sort-by instead."),
    (
        r"--filter[\s=]",
        "kubectl does not have a --filter flag. Use -l (label selector) or field selectors.",
    ),
    (r"--format[\s=]", "kubectl does not have a --format flag. Use -o or --output instead."),
    (
        r"--limit[\s=]",
        "kubectl does not have a --limit flag. Use --field-selector or pipe to head.",
    ),
    (r"--where[\s=]", "kubectl does not have a --where flag. Use --field-selector instead."),
    (r"--order-by[\s=]", "kubectl does not have an --order-by flag. Use --sort-by instead."),
    (
        r"get pods --memory",
        "kubectl get pods does not show memory directly. Use 'kubectl top pods' instead.",
    ),
    (
        r"get pods --cpu",
        "kubectl get pods does not show CPU directly. Use 'kubectl top pods' instead.",
    ),
    (r"logs --grep", "kubectl logs does not have a --grep flag. Pipe to grep instead."),
    (
        r"apply --force-delete",
        "kubectl apply does not have --force-delete. Use 'kubectl delete --force' separately.",
    ),
];

const SUBCOMMANDS: &[&str] = &[
    "get", "describe", "logs", "exec", "apply", "create", "delete", "edit", "replace", "patch",
    "scale", "rollout", "expose", "port-forward", "proxy", "cp", "attach", "run", "explain",
    "drain", "cordon", "uncordon", "taint", "label", "annotate", "config", "cluster-info", "top",
    "api-resources", "api-versions", "auth", "wait", "diff", "kustomize", "debug", "version",
];

const DANGEROUS_OPS: &[&str] = &["delete --all", "delete namespace", "delete", "drain"];

/// Kubernetes cluster CLI
#[derive(Debug, Clone)]
pub struct KubectlValidator {
    flags: Vec<FlagRule>,
}

impl KubectlValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
        }
    }
}

impl Default for KubectlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for KubectlValidator {
    fn name(&self) -> &'static str {
        "kubectl"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["kubectl", "k"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = expand_alias(command, ALIASES);

        find_hallucination(&self.flags, &command)
            .or_else(|| check_subcommand("kubectl", &command, SUBCOMMANDS))
            .or_else(|| {
                find_substring(&command, DANGEROUS_OPS).map(|op| {
                    ValidationOutcome::warning(format!(
                        "Dangerous operation detected: '{}'. Ensure this is intentional.",
                        op
                    ))
                })
            })
            .unwrap_or_default()
    }
}
