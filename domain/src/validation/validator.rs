//! Tool validator trait

use super::outcome::ValidationOutcome;

/// Recognizes one tool's commands and checks them
///
/// `validate` is only called when `can_handle` returned true.
pub trait CommandValidator: Send + Sync {
    /// Tool name, used in logs and `check` output
    fn name(&self) -> &'static str;

    fn can_handle(&self, command: &str) -> bool;

    fn validate(&self, command: &str) -> ValidationOutcome;
}
