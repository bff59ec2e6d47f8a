//! ansible family validator (`ansible`, `ansible-playbook`, ...)
//!
//! The entry points are separate binaries, so there is no subcommand check.

use crate::core::string::first_token;
use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{FlagRule, compile_rules, find_hallucination, invoked_as};
use crate::validation::validator::CommandValidator;

const BINARIES: &[&str] = &[
    "ansible", "ansible-playbook", "ansible-vault", "ansible-galaxy", "ansible-config",
    "ansible-console", "ansible-doc", "ansible-inventory", "ansible-pull",
];

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (r"--force(\s|=|$)", "ansible-playbook does not have --force. Use --check for dry-run."),
    (r"--yes(\s|$)", "ansible does not have --yes. It doesn't prompt by default."),
    (r"--auto-approve", "ansible does not have --auto-approve."),
    (r"--dry-run", "use --check (not --dry-run) for ansible dry-run mode."),
    (r"--parallel", "use -f or --forks (not --parallel) to control parallelism."),
    (r"--inventory-file", "use -i or --inventory (not --inventory-file)."),
    (
        r"--playbook",
        "ansible-playbook doesn't need --playbook flag. Just provide the playbook file.",
    ),
    (r"--sudo", "--sudo is deprecated. Use --become instead."),
];

const DANGEROUS_MODULES: &[&str] = &["shell", "command", "raw", "file", "copy", "template"];

/// Configuration management CLI
#[derive(Debug, Clone)]
pub struct AnsibleValidator {
    flags: Vec<FlagRule>,
}

impl AnsibleValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
        }
    }

    fn dangerous_op(command: &str) -> Option<ValidationOutcome> {
        let tokens: Vec<&str> = command.split_whitespace().collect();

        // Ad-hoc runs only
        if first_token(command) == "ansible" {
            let risky_module = DANGEROUS_MODULES.iter().find(|module| {
                command.contains(&format!("-m {}", module))
                    || command.contains(&format!("--module-name={}", module))
            });
            if let Some(module) = risky_module {
                return Some(ValidationOutcome::warning(format!(
                    "Using module '{}' in ad-hoc command. This can be dangerous. Consider using a playbook for better control and logging.",
                    module
                )));
            }
        }

        let becomes = tokens.iter().any(|t| *t == "--become" || *t == "-b");
        let limited = tokens
            .iter()
            .any(|t| t.starts_with("--limit") || t.starts_with("-l"));
        if becomes && !limited {
            return Some(ValidationOutcome::warning(
                "Running with elevated privileges (--become) without --limit. This affects ALL hosts in the inventory!",
            ));
        }

        if (command.contains("-m shell") || command.contains("-m command"))
            && (command.contains("rm -rf") || command.contains("rm -fr"))
        {
            return Some(ValidationOutcome::warning(
                "Dangerous command detected: rm -rf in ansible shell/command module. This could delete critical files!",
            ));
        }

        None
    }

    fn common_mistakes(command: &str) -> Option<ValidationOutcome> {
        if first_token(command) == "ansible-playbook"
            && !command.contains("-i ")
            && !command.contains("--inventory")
        {
            return Some(ValidationOutcome::caution(
                "No inventory specified. Ansible will use default /etc/ansible/hosts. Is this intentional?",
            ));
        }

        if command.contains("--syntax-check")
            && (command.contains("--check ")
                || command.ends_with("--check")
                || command.contains("--diff"))
        {
            return Some(ValidationOutcome::invalid(
                "--syntax-check only validates syntax. It doesn't run with --check or --diff.",
            ));
        }

        None
    }
}

impl Default for AnsibleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for AnsibleValidator {
    fn name(&self) -> &'static str {
        "ansible"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, BINARIES)
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = command.trim();

        find_hallucination(&self.flags, command)
            .or_else(|| Self::dangerous_op(command))
            .or_else(|| Self::common_mistakes(command))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playbook_with_inventory_is_fine() {
        let outcome =
            AnsibleValidator::new().validate("ansible-playbook -i hosts.ini site.yml --check");
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_missing_inventory_is_advisory() {
        let outcome = AnsibleValidator::new().validate("ansible-playbook site.yml");
        assert!(outcome.is_warning());
        assert!(outcome.message().unwrap().contains("No inventory specified"));
    }

    #[test]
    fn test_become_without_limit() {
        let outcome =
            AnsibleValidator::new().validate("ansible-playbook -i prod site.yml --become");
        assert!(outcome.message().unwrap().contains("without --limit"));
        let limited = AnsibleValidator::new()
            .validate("ansible-playbook -i prod site.yml --become --limit web");
        assert!(limited.is_ok());
    }

    #[test]
    fn test_adhoc_shell_module() {
        let outcome = AnsibleValidator::new().validate("ansible all -i hosts -m shell -a uptime");
        assert!(outcome.message().unwrap().contains("module 'shell'"));
    }

    #[test]
    fn test_dry_run_is_hallucinated() {
        let outcome = AnsibleValidator::new().validate("ansible-playbook -i h site.yml --dry-run");
        assert!(outcome.is_blocking());
    }

    #[test]
    fn test_force_handlers_is_not_force() {
        assert!(AnsibleValidator::new()
            .validate("ansible-playbook -i h site.yml --force-handlers")
            .is_ok());
    }
}
