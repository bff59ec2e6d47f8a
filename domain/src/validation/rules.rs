//! Table-driven building blocks shared by the tool validators

use super::outcome::ValidationOutcome;
use crate::core::string::first_token;
use regex::Regex;

/// A flag or subcommand the tool does not have, with the correction
#[derive(Debug, Clone)]
pub struct FlagRule {
    pattern: Regex,
    message: &'static str,
}

impl FlagRule {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Compile a `(pattern, message)` table. Patterns that fail to compile are skipped.
pub fn compile_rules(table: &[(&str, &'static str)]) -> Vec<FlagRule> {
    table
        .iter()
        .filter_map(|&(pattern, message)| {
            Regex::new(pattern)
                .ok()
                .map(|pattern| FlagRule { pattern, message })
        })
        .collect()
}

/// First rule matching anywhere in the command.
pub fn find_hallucination(rules: &[FlagRule], command: &str) -> Option<ValidationOutcome> {
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(command))
        .map(|rule| ValidationOutcome::invalid(rule.message))
}

/// Replace a shorthand first token with its canonical form.
pub fn expand_alias(command: &str, aliases: &[(&str, &str)]) -> String {
    let mut tokens = command.split_whitespace();
    let Some(first) = tokens.next() else {
        return command.to_string();
    };

    match aliases.iter().find(|(alias, _)| *alias == first) {
        Some((_, expanded)) => {
            let rest: Vec<&str> = tokens.collect();
            if rest.is_empty() {
                expanded.to_string()
            } else {
                format!("{} {}", expanded, rest.join(" "))
            }
        }
        None => command.to_string(),
    }
}

/// Whether the first token is one of `names` (tool name or alias).
pub fn invoked_as(command: &str, names: &[&str]) -> bool {
    names.contains(&first_token(command))
}

/// Check the token after the tool name against an allow-list.
///
/// A leading `-` token is a global flag and passes.
pub fn check_subcommand(tool: &str, command: &str, allowed: &[&str]) -> Option<ValidationOutcome> {
    let Some(sub) = command.split_whitespace().nth(1) else {
        return Some(ValidationOutcome::invalid(format!("incomplete {} command", tool)));
    };

    if sub.starts_with('-') || allowed.contains(&sub) {
        return None;
    }

    Some(ValidationOutcome::invalid(format!(
        "'{}' is not a valid {} subcommand. Use '{} --help' to see valid commands.",
        sub, tool, tool
    )))
}

/// First listed operation that appears as a substring of the command.
pub fn find_substring<'a>(command: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| command.contains(c))
}
