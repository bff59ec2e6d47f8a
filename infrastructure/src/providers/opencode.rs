//! External agent process backend (`opencode run`)
//!
//! The prompt is passed as a positional argument; `-m <model>` is added only
//! for namespaced model identifiers. Stdout is the completion.

use async_trait::async_trait;
use shellfix_application::ports::backend::{BackendError, SuggestionBackend};
use shellfix_domain::{Model, PromptTemplate, ProviderKind, Request, Router, Suggestion};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Backend driving the `opencode` CLI
pub struct OpenCodeBackend {
    binary: String,
    router: Router,
    preferred_model: Option<Model>,
}

impl OpenCodeBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            router: Router::for_family(ProviderKind::OpenCode),
            preferred_model: None,
        }
    }

    /// Pin one model instead of routing per command.
    pub fn with_preferred_model(mut self, model: Option<Model>) -> Self {
        self.preferred_model = model;
        self
    }

    fn command(&self) -> Result<Command, BackendError> {
        if which::which(&self.binary).is_err() {
            return Err(BackendError::Unavailable(format!(
                "'{}' not found in PATH",
                self.binary
            )));
        }
        let mut cmd = Command::new(&self.binary);
        cmd.stdin(Stdio::null()).kill_on_drop(true);
        Ok(cmd)
    }
}

/// Arguments for `opencode run`.
fn run_args(model: &Model, prompt: &str) -> Vec<String> {
    let mut args = vec!["run".to_string()];
    if model.is_namespaced() {
        args.push("-m".to_string());
        args.push(model.as_str().to_string());
    }
    args.push(prompt.to_string());
    args
}

/// Model identifiers from `opencode models` output (lines containing `/`).
fn parse_model_list(output: &str) -> Vec<Model> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('/'))
        .filter_map(|line| line.parse().ok())
        .collect()
}

#[async_trait]
impl SuggestionBackend for OpenCodeBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenCode
    }

    fn model_for(&self, request: &Request) -> Model {
        self.preferred_model
            .clone()
            .unwrap_or_else(|| self.router.select_model(request.command(), request.mode()))
    }

    async fn query(&self, request: &Request) -> Result<Suggestion, BackendError> {
        let model = self.model_for(request);
        let prompt = PromptTemplate::for_request(request);
        debug!("opencode prompt for {}: {} chars", model, prompt.len());

        let output = self
            .command()?
            .args(run_args(&model, &prompt))
            .output()
            .await
            .map_err(|e| BackendError::Transport(format!("failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Transport(format!(
                "opencode command failed: {}, stderr: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Suggestion::from_completion(
            &stdout,
            model,
            ProviderKind::OpenCode.as_str(),
        ))
    }

    async fn is_available(&self) -> bool {
        match self.command() {
            Ok(mut cmd) => cmd
                .arg("version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map(|status| status.success())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> Result<Vec<Model>, BackendError> {
        let output = self
            .command()?
            .arg("models")
            .output()
            .await
            .map_err(|e| BackendError::Transport(format!("failed to list models: {}", e)))?;

        if !output.status.success() {
            return Err(BackendError::Transport(format!(
                "failed to list models: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(parse_model_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_flag_only_for_namespaced_models() {
        assert_eq!(
            run_args(&Model::ClaudeSonnet4, "fix it"),
            vec!["run", "-m", "anthropic/claude-sonnet-4-20250514", "fix it"]
        );
        assert_eq!(
            run_args(&Model::Custom("sonnet".to_string()), "fix it"),
            vec!["run", "fix it"]
        );
    }

    #[test]
    fn test_parse_model_list() {
        let output = "Available models:\n  anthropic/claude-3-5-haiku-20241022\n\nopenai/gpt-4.1\n";
        assert_eq!(
            parse_model_list(output),
            vec![
                Model::ClaudeHaiku35,
                Model::Custom("openai/gpt-4.1".to_string())
            ]
        );
    }

    #[test]
    fn test_routing_uses_opencode_family() {
        let backend = OpenCodeBackend::new("opencode");
        let request = Request::reactive("terraform plan", "Error: missing provider", 1).unwrap();
        assert_eq!(backend.model_for(&request), Model::ClaudeSonnet4);
        let trivial = Request::reactive("ls /nope", "No such file", 2).unwrap();
        assert_eq!(backend.model_for(&trivial), Model::ClaudeHaiku35);
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let backend = OpenCodeBackend::new("shellfix-no-such-binary");
        assert!(!backend.is_available().await);
        let request = Request::proactive("list files").unwrap();
        assert!(matches!(
            backend.query(&request).await,
            Err(BackendError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    fn fake_binary(dir: &std::path::Path, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("opencode");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_query_parses_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_binary(
            dir.path(),
            r#"printf '✓ git pull --rebase\nRoot: The branch is behind its upstream.\n'"#,
        );
        let backend = OpenCodeBackend::new(binary);
        let request = Request::reactive("git push", "rejected: non-fast-forward", 1).unwrap();

        let suggestion = backend.query(&request).await.unwrap();
        assert_eq!(suggestion.command, "git pull --rebase");
        assert_eq!(suggestion.backend_id, "opencode");
        assert!(backend.is_available().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_binary(dir.path(), "echo 'auth expired' >&2; exit 3");
        let backend = OpenCodeBackend::new(binary);
        let request = Request::proactive("list files").unwrap();

        let err = backend.query(&request).await.unwrap_err();
        let BackendError::Transport(message) = err else {
            panic!("expected transport error");
        };
        assert!(message.contains("auth expired"));
        assert!(!backend.is_available().await);
    }
}
