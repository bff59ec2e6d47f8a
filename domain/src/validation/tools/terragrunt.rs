//! terragrunt validator

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, expand_alias, find_hallucination, find_substring,
    invoked_as,
};
use crate::validation::validator::CommandValidator;
use regex::Regex;

const ALIASES: &[(&str, &str)] = &[("tg", "terragrunt")];

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (r"--all-modules", "terragrunt does not have --all-modules. Use run-all subcommand instead."),
    (r"--recurse", "terragrunt does not have --recurse. Use run-all subcommand instead."),
    (
        r"--force-yes",
        "terragrunt does not have --force-yes. Use -auto-approve for terraform commands.",
    ),
    (r"--skip-validation", "terragrunt does not have --skip-validation."),
    (
        r"apply --target-all",
        "terragrunt apply does not have --target-all. Use apply-all or run-all apply.",
    ),
    (r"destroy --force", "terragrunt destroy does not have --force. Use -auto-approve instead."),
    (r"--skip-dependencies", "Use --terragrunt-ignore-dependency-errors instead."),
    (r"--parallel(\s|=|$)", "Use --terragrunt-parallelism instead."),
    (
        r"run-all --auto-approve",
        "Use --terragrunt-non-interactive instead for run-all commands.",
    ),
];

const SUBCOMMANDS: &[&str] = &[
    // terragrunt's own
    "run-all", "apply-all", "destroy-all", "plan-all", "output-all", "validate-all",
    "graph-dependencies", "hclfmt", "aws-provider-patch", "render-json", "validate-inputs",
    "graph",
    // passed through to terraform
    "init", "plan", "apply", "destroy", "validate", "fmt", "force-unlock", "get", "import",
    "login", "logout", "output", "providers", "refresh", "show", "state", "taint", "untaint",
    "version", "workspace", "console", "test", "metadata",
];

// "-all" forms first so they get the stronger wording
const DANGEROUS_OPS: &[&str] = &["destroy-all", "apply-all", "destroy", "force-unlock"];

/// Terraform wrapper CLI
#[derive(Debug, Clone)]
pub struct TerragruntValidator {
    flags: Vec<FlagRule>,
    bare_working_dir: Option<Regex>,
    bare_config: Option<Regex>,
}

impl TerragruntValidator {
    pub fn new() -> Self {
        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
            bare_working_dir: Regex::new(r"--working-dir\s").ok(),
            bare_config: Regex::new(r"--config\s").ok(),
        }
    }

    fn dangerous_op(command: &str) -> Option<ValidationOutcome> {
        find_substring(command, DANGEROUS_OPS).map(|op| {
            if op.contains("-all") {
                ValidationOutcome::warning(format!(
                    "EXTREMELY DANGEROUS: 'terragrunt {}' will affect ALL modules in the dependency tree. This can destroy entire environments!",
                    op
                ))
            } else {
                ValidationOutcome::warning(format!(
                    "Dangerous operation detected: 'terragrunt {}'. This will modify or destroy infrastructure.",
                    op
                ))
            }
        })
    }

    fn common_mistakes(&self, command: &str) -> Option<ValidationOutcome> {
        if command.contains("run-all") && command.contains("-target") {
            return Some(ValidationOutcome::invalid(
                "-target doesn't work with run-all. Use it with individual apply/plan commands.",
            ));
        }

        if self.bare_working_dir.as_ref().is_some_and(|re| re.is_match(command)) {
            return Some(ValidationOutcome::invalid("did you mean --terragrunt-working-dir?"));
        }

        if self.bare_config.as_ref().is_some_and(|re| re.is_match(command)) {
            return Some(ValidationOutcome::invalid("did you mean --terragrunt-config?"));
        }

        if command.contains("run-all apply") && !command.contains("--terragrunt-non-interactive") {
            return Some(ValidationOutcome::caution(
                "run-all apply without --terragrunt-non-interactive will prompt for each module. Consider adding this flag.",
            ));
        }

        None
    }
}

impl Default for TerragruntValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for TerragruntValidator {
    fn name(&self) -> &'static str {
        "terragrunt"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["terragrunt", "tg"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = expand_alias(command, ALIASES);

        find_hallucination(&self.flags, &command)
            .or_else(|| check_subcommand("terragrunt", &command, SUBCOMMANDS))
            .or_else(|| Self::dangerous_op(&command))
            .or_else(|| self.common_mistakes(&command))
            .unwrap_or_default()
    }
}
