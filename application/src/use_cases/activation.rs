//! Activation gate: does a failed command get assistance at all?

use super::decision::DecisionContext;
use shellfix_domain::ActivationPolicy;
use shellfix_domain::core::string::first_token;

/// What the caller should do with a failed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Run the pipeline now
    Run,
    /// Ask the user first (interactive mode)
    Prompt,
    /// Do nothing and keep the original exit code
    PassThrough,
}

/// Evaluate the gate for `command`. The tool is the command's first token.
///
/// `forced` is an explicit request by the user, which opens the gate in
/// manual mode but never when the tool is disabled.
pub fn evaluate_activation(
    policy: &ActivationPolicy,
    command: &str,
    ctx: &DecisionContext,
    forced: bool,
) -> Activation {
    let tool = first_token(command);

    if ctx.is_session_disabled() || !policy.is_enabled(tool) {
        return Activation::PassThrough;
    }
    if forced || policy.should_trigger(tool) {
        return Activation::Run;
    }
    if policy.should_prompt(tool) {
        return Activation::Prompt;
    }
    Activation::PassThrough
}
