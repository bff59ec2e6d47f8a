//! argocd validator

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, find_hallucination, invoked_as,
};
use crate::validation::validator::CommandValidator;

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (r"app create --auto-sync", "use --sync-policy automated (not --auto-sync)."),
    (r"app sync --wait", "use --timeout instead of --wait."),
    (r"app delete --force", "use --cascade (not --force) to control deletion behavior."),
    (
        r"--namespace",
        "use --dest-namespace for app destination, or --app-namespace for app placement.",
    ),
    (
        r"app rollback",
        "argocd doesn't have 'app rollback'. Use 'app sync --revision <version>' instead.",
    ),
    (r"--auto-approve", "argocd does not have --auto-approve."),
    (r"app deploy", "argocd doesn't have 'app deploy'. Use 'app sync' instead."),
    (r"app list --sort(\s|=|$)", "use --sort-by (not --sort)."),
];

const SUBCOMMANDS: &[&str] = &[
    "account", "admin", "app", "appset", "cert", "cluster", "completion", "context", "gpg",
    "login", "logout", "proj", "relogin", "repo", "repocreds", "version",
];

/// (operation, warning)
const DANGEROUS_OPS: &[(&str, &str)] = &[
    (
        "app delete",
        "Dangerous: This will delete the ArgoCD application and potentially the deployed resources!",
    ),
    (
        "app terminate-op",
        "Terminating an operation might leave the application in an inconsistent state.",
    ),
    ("admin", "Admin commands can modify ArgoCD's core configuration. Be careful!"),
    (
        "cluster rm",
        "This will remove cluster from ArgoCD, affecting all apps deployed to it!",
    ),
];

/// GitOps controller CLI
#[derive(Debug, Clone)]
pub struct ArgocdValidator {
    flags: Vec<FlagRule>,
}

impl ArgocdValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
        }
    }
}

impl Default for ArgocdValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for ArgocdValidator {
    fn name(&self) -> &'static str {
        "argocd"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["argocd"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = command.trim();

        find_hallucination(&self.flags, command)
            .or_else(|| check_subcommand("argocd", command, SUBCOMMANDS))
            .or_else(|| {
                DANGEROUS_OPS
                    .iter()
                    .find(|(op, _)| command.contains(op))
                    .map(|(_, warning)| ValidationOutcome::warning(warning))
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_is_fine() {
        assert!(ArgocdValidator::new().validate("argocd app sync guestbook").is_ok());
    }

    #[test]
    fn test_rollback_is_hallucinated() {
        let outcome = ArgocdValidator::new().validate("argocd app rollback guestbook");
        assert!(outcome.is_blocking());
        assert!(outcome.message().unwrap().contains("--revision"));
    }

    #[test]
    fn test_app_delete_is_advisory() {
        let outcome = ArgocdValidator::new().validate("argocd app delete guestbook");
        assert!(outcome.is_warning());
    }

    #[test]
    fn test_sort_by_is_fine() {
        assert!(ArgocdValidator::new().validate("argocd app list --sort-by name").is_ok());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(ArgocdValidator::new().validate("argocd apps list").is_blocking());
    }
}
