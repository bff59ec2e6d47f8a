//! git validator, including the Oh My Zsh alias set

use crate::core::string::first_token;
use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::{
    FlagRule, check_subcommand, compile_rules, expand_alias, find_hallucination,
};
use crate::validation::validator::CommandValidator;
use regex::Regex;

const ALIASES: &[(&str, &str)] = &[
    ("gco", "git checkout"),
    ("gcb", "git checkout -b"),
    ("gcm", "git checkout master"),
    ("gcd", "git checkout develop"),
    ("gcmg", "git checkout main"),
    ("ga", "git add"),
    ("gaa", "git add --all"),
    ("gc", "git commit -v"),
    ("gc!", "git commit -v --amend"),
    ("gcmsg", "git commit -m"),
    ("gca", "git commit -v -a"),
    ("gca!", "git commit -v -a --amend"),
    ("gcam", "git commit -a -m"),
    ("gb", "git branch"),
    ("gba", "git branch -a"),
    ("gbd", "git branch -d"),
    ("gbD", "git branch -D"),
    ("gst", "git status"),
    ("gss", "git status -s"),
    ("gd", "git diff"),
    ("gdca", "git diff --cached"),
    ("gp", "git push"),
    ("gpf", "git push --force"),
    ("gpf!", "git push --force"),
    ("gl", "git pull"),
    ("ggl", "git pull origin"),
    ("ggp", "git push origin"),
    ("gf", "git fetch"),
    ("gfa", "git fetch --all"),
    ("glog", "git log --oneline --decorate"),
    (
        "glol",
        "git log --graph --pretty='%Cred%h%Creset -%C(auto)%d%Creset %s %Cgreen(%cr) %C(bold blue)<%an>%Creset'",
    ),
    (
        "glola",
        "git log --graph --pretty='%Cred%h%Creset -%C(auto)%d%Creset %s %Cgreen(%cr) %C(bold blue)<%an>%Creset' --all",
    ),
    ("gm", "git merge"),
    ("grb", "git rebase"),
    ("grbi", "git rebase -i"),
    ("grbc", "git rebase --continue"),
    ("grba", "git rebase --abort"),
    ("gsta", "git stash"),
    ("gstp", "git stash pop"),
    ("gstl", "git stash list"),
    ("gr", "git remote"),
    ("gra", "git remote add"),
    ("grv", "git remote -v"),
    ("grmv", "git remote rename"),
    ("grrm", "git remote remove"),
    ("gcl", "git clone"),
    ("grh", "git reset"),
    ("grhh", "git reset --hard"),
    ("gclean", "git clean -fd"),
];

pub(crate) const HALLUCINATED_FLAGS: &[(&str, &str)] = &[
    (
        r"push --force-all",
        "git push does not have a --force-all flag. Use --force or --force-with-lease.",
    ),
    (r"commit --push", "git commit does not have a --push flag. Run 'git push' separately."),
    (
        r"pull --commit",
        "git pull does not have a --commit flag. Commits are created automatically during merge.",
    ),
    (
        r"log --sort",
        "git log does not have a --sort flag. Use --author-date-order or --date-order instead.",
    ),
    (
        r"branch --rename-all",
        "git branch does not have a --rename-all flag. Use -m to rename a single branch.",
    ),
    (r"merge --force-merge", "git merge does not have a --force-merge flag."),
    (
        r"checkout --create",
        "git checkout does not have a --create flag. Use -b to create a new branch.",
    ),
    (r"stash --list", "Use 'git stash list' (without --list flag)."),
    (r"rebase --interactive", "Use 'git rebase -i' (not --interactive)."),
];

const SUBCOMMANDS: &[&str] = &[
    "add", "bisect", "branch", "checkout", "cherry-pick", "clean", "clone", "commit", "config",
    "diff", "fetch", "grep", "init", "log", "merge", "mv", "pull", "push", "rebase", "remote",
    "reset", "restore", "revert", "rm", "show", "stash", "status", "switch", "tag", "worktree",
];

/// (pattern, risk, safer alternative, blocks)
pub(crate) const DANGEROUS_OPS: &[(&str, &str, &str, bool)] = &[
    (
        r"push\s+(-f|--force)\s+.*\s+(main|master)$",
        "Force pushing to main/master branch is dangerous and can cause data loss for other team members.",
        "Use --force-with-lease instead, or push to a feature branch first.",
        true,
    ),
    (
        r"reset\s+--hard",
        "git reset --hard will permanently delete uncommitted changes.",
        "Consider using 'git stash' to save changes, or 'git reset --soft' to keep changes staged.",
        false,
    ),
    (
        r"clean\s+-[dfx]+",
        "git clean will permanently delete untracked files.",
        "Run with -n (--dry-run) first to see what will be deleted.",
        false,
    ),
    (
        r"push\s+(-f|--force)(\s|$)",
        "Force pushing can overwrite remote history and cause issues for collaborators.",
        "Use --force-with-lease instead, which is safer.",
        false,
    ),
    (
        r"rebase\s+.*\s*(main|master)",
        "Rebasing main/master can cause issues if others are working on it.",
        "Consider merging instead, or ensure you're not rewriting shared history.",
        false,
    ),
    (
        r"branch\s+-D",
        "git branch -D will force delete a branch, even with unmerged changes.",
        "Use -d instead to safely delete only merged branches.",
        false,
    ),
];

#[derive(Debug, Clone)]
struct DangerousOp {
    pattern: Regex,
    risk: &'static str,
    alternative: &'static str,
    blocks: bool,
}

/// Version control CLI
#[derive(Debug, Clone)]
pub struct GitValidator {
    flags: Vec<FlagRule>,
    dangerous: Vec<DangerousOp>,
}

impl GitValidator {
    pub fn new() -> Self {
        let dangerous = DANGEROUS_OPS
            .iter()
            .filter_map(|&(pattern, risk, alternative, blocks)| {
                Regex::new(pattern).ok().map(|pattern| DangerousOp {
                    pattern,
                    risk,
                    alternative,
                    blocks,
                })
            })
            .collect();

        Self {
            flags: compile_rules(HALLUCINATED_FLAGS),
            dangerous,
        }
    }

    fn dangerous_op(&self, command: &str) -> Option<ValidationOutcome> {
        self.dangerous
            .iter()
            .find(|op| op.pattern.is_match(command))
            .map(|op| {
                if op.blocks {
                    ValidationOutcome::blocked(op.risk, op.alternative)
                } else {
                    ValidationOutcome::warning_with_suggestion(op.risk, op.alternative)
                }
            })
    }
}

impl Default for GitValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator for GitValidator {
    fn name(&self) -> &'static str {
        "git"
    }

    fn can_handle(&self, command: &str) -> bool {
        let first = first_token(command);
        first == "git" || ALIASES.iter().any(|(alias, _)| *alias == first)
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let command = expand_alias(command, ALIASES);

        find_hallucination(&self.flags, &command)
            .or_else(|| check_subcommand("git", &command, SUBCOMMANDS))
            .or_else(|| self.dangerous_op(&command))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_push_to_main_is_blocked() {
        let outcome = GitValidator::new().validate("git push --force origin main");
        assert!(outcome.is_blocking());
        assert!(outcome.message().unwrap().starts_with("🚨 BLOCKED"));
    }

    #[test]
    fn test_reset_hard_is_advisory() {
        let outcome = GitValidator::new().validate("git reset --hard");
        assert!(outcome.is_warning());
        assert!(outcome.message().unwrap().contains("git stash"));
    }

    #[test]
    fn test_force_push_to_feature_branch_is_advisory() {
        let outcome = GitValidator::new().validate("git push -f origin feature/login");
        assert!(outcome.is_warning());
    }

    #[test]
    fn test_force_with_lease_is_fine() {
        assert!(GitValidator::new().validate("git push --force-with-lease origin main").is_ok());
    }

    #[test]
    fn test_zsh_aliases() {
        let v = GitValidator::new();
        assert!(v.can_handle("gst"));
        assert!(v.validate("gst").is_ok());
        assert!(v.validate("grhh").is_warning());
        assert!(v.validate("gpf origin master").is_blocking());
        assert!(!v.can_handle("go build"));
    }

    #[test]
    fn test_global_flag_is_not_a_subcommand() {
        assert!(GitValidator::new().validate("git --version").is_ok());
    }

    #[test]
    fn test_hallucinated_flag() {
        let outcome = GitValidator::new().validate("git checkout --create feature");
        assert_eq!(
            outcome.message(),
            Some("git checkout does not have a --create flag. Use -b to create a new branch.")
        );
    }

    #[test]
    fn test_dangerous_table_compiles() {
        assert_eq!(GitValidator::new().dangerous.len(), DANGEROUS_OPS.len());
    }
}
