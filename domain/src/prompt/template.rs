//! Prompt templates for both request modes

use crate::request::{Request, RequestMode};
use crate::suggestion::parsing::{ROOT_PREFIX, SUCCESS_MARKER, TIP_PREFIX};

/// Templates for generating backend prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Build the prompt for a request, picking the template by mode.
    pub fn for_request(request: &Request) -> String {
        match request.mode() {
            RequestMode::Reactive => Self::reactive(request),
            RequestMode::Proactive => Self::proactive(request),
        }
    }

    /// Prompt asking the model to repair a failed command
    pub fn reactive(request: &Request) -> String {
        let mut prompt = format!(
            r#"You are a senior DevOps/SRE. Fix this failed command.

CRITICAL RULES:
1. DO NOT output "Thinking..." or any reasoning process
2. DO NOT start with "Okay," "Let me," "Wait," or any explanation
3. START IMMEDIATELY with {marker} followed by the corrected command
4. NO thinking blocks, NO verbose reasoning, NO process explanation

Command: {command}
Error: {error}
Exit: {exit}
Dir: {dir}
"#,
            marker = SUCCESS_MARKER,
            command = request.command(),
            error = request.error(),
            exit = request.exit_code(),
            dir = request.working_directory().display(),
        );

        if let Some(context) = request.extra_context() {
            prompt.push_str(&format!("Context: {}\n", context));
        }

        prompt.push_str(&format!(
            r#"
REQUIRED OUTPUT FORMAT (start immediately, no preamble):
{marker} [corrected command]
{root} [1 sentence why it failed]
{tip} [optional best practice]

Your first line MUST be: {marker} [command]"#,
            marker = SUCCESS_MARKER,
            root = ROOT_PREFIX,
            tip = TIP_PREFIX,
        ));

        prompt
    }

    /// Prompt asking the model to turn natural language into a command
    pub fn proactive(request: &Request) -> String {
        format!(
            r#"You are a senior DevOps/SRE. Convert this natural language query to a command.

CRITICAL RULES:
1. DO NOT output "Thinking..." or any reasoning process
2. START IMMEDIATELY with {marker} followed by the command
3. NO verbose reasoning, NO process explanation

Query: {query}
Context: {context}
Dir: {dir}

REQUIRED OUTPUT FORMAT (start immediately):
{marker} [command]
{root} [1 sentence what this does]
{tip} [optional safety note or best practice]

Your first line MUST be: {marker} [command]"#,
            marker = SUCCESS_MARKER,
            root = ROOT_PREFIX,
            tip = TIP_PREFIX,
            query = request.command(),
            context = request.extra_context().unwrap_or(""),
            dir = request.working_directory().display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactive_prompt_contains_inputs() {
        let req = Request::reactive("terraform aply", "Terraform has no command named \"aply\"", 127)
            .unwrap()
            .with_working_directory("/srv/infra");
        let prompt = PromptTemplate::for_request(&req);
        assert!(prompt.contains("Fix this failed command"));
        assert!(prompt.contains("Command: terraform aply"));
        assert!(prompt.contains("Exit: 127"));
        assert!(prompt.contains("Dir: /srv/infra"));
        assert!(prompt.contains("Your first line MUST be: ✓ [command]"));
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_reactive_prompt_includes_requery_context() {
        let req = Request::reactive("docker ps --sort", "unknown flag", 125).unwrap();
        let retry = req.with_requery_context("docker ps --sort=name", "no --sort flag");
        let prompt = PromptTemplate::for_request(&retry);
        assert!(prompt.contains("Context: Previous suggestion 'docker ps --sort=name' was invalid"));
    }

    #[test]
    fn test_proactive_prompt() {
        let req = Request::proactive("list all running containers").unwrap();
        let prompt = PromptTemplate::for_request(&req);
        assert!(prompt.contains("Convert this natural language query"));
        assert!(prompt.contains("Query: list all running containers"));
        assert!(prompt.contains("Root: [1 sentence what this does]"));
    }
}
