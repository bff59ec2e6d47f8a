//! terraform validator

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, expand_alias, find_hallucination, find_substring,
    invoked_as,
};
use crate::validation::validator::CommandValidator;
use regex::Regex;

const ALIASES: &[(&str, &str)] = &[("tf", "terraform")];

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (
        r"plan --apply",
        "terraform plan does not have an --apply flag. Run 'terraform apply' separately.",
    ),
    (
        r"apply --plan",
        "terraform apply does not take a --plan flag. Use 'terraform apply plan.tfplan' to apply a saved plan.",
    ),
    (r"--force-yes", "terraform does not have a --force-yes flag. Use -auto-approve instead."),
    (r"--skip-validation", "terraform does not have a --skip-validation flag."),
    (
        r"apply --target-all",
        "terraform apply does not have a --target-all flag. Omit --target to apply all resources.",
    ),
    (
        r"destroy --force",
        "terraform destroy does not have a --force flag. Use -auto-approve instead.",
    ),
    (
        r"init --upgrade-modules",
        "terraform init does not have --upgrade-modules. Use -upgrade instead.",
    ),
    (r"plan --save", "terraform plan does not have a --save flag. Use -out=FILE to save the plan."),
    (
        r"apply --dry-run",
        "terraform apply does not have a --dry-run flag. Use 'terraform plan' instead.",
    ),
];

const SUBCOMMANDS: &[&str] = &[
    "init", "plan", "apply", "destroy", "validate", "fmt", "force-unlock", "get", "graph",
    "import", "login", "logout", "output", "providers", "refresh", "show", "state", "taint",
    "untaint", "version", "workspace", "console", "test", "metadata",
];

const DANGEROUS_OPS: &[&str] = &["destroy", "force-unlock", "taint"];

/// Infrastructure provisioning CLI
#[derive(Debug, Clone)]
pub struct TerraformValidator {
    flags: Vec<FlagRule>,
    dangling_target: Option<Regex>,
    dangling_var: Option<Regex>,
}

impl TerraformValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
            dangling_target: Regex::new(r"-target\s*$").ok(),
            dangling_var: Regex::new(r"-var\s*$").ok(),
        }
    }

    fn common_mistakes(&self, command: &str) -> Option<ValidationOutcome> {
        if command.contains("apply")
            && command.contains("auto-approve")
            && !command.contains("-auto-approve")
        {
            return Some(ValidationOutcome::invalid(
                "did you mean -auto-approve? (note the single dash)",
            ));
        }

        if self.dangling_target.as_ref().is_some_and(|re| re.is_match(command)) {
            return Some(ValidationOutcome::invalid(
                "-target flag requires a value. Example: -target=aws_instance.example",
            ));
        }

        if self.dangling_var.as_ref().is_some_and(|re| re.is_match(command)) {
            return Some(ValidationOutcome::invalid(
                "-var flag requires a value. Example: -var=\"key=value\"",
            ));
        }

        None
    }
}

impl Default for TerraformValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for TerraformValidator {
    fn name(&self) -> &'static str {
        "terraform"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["terraform", "tf"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = expand_alias(command, ALIASES);

        find_hallucination(&self.flags, &command)
            .or_else(|| check_subcommand("terraform", &command, SUBCOMMANDS))
            .or_else(|| {
                find_substring(&command, DANGEROUS_OPS).map(|op| {
                    ValidationOutcome::warning(format!(
                        "Dangerous operation detected: 'terraform {}'. This will modify or destroy infrastructure.",
                        op
                    ))
                })
            })
            .or_else(|| self.common_mistakes(&command))
            .unwrap_or_default()
    }
}
