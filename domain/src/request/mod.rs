//! Request entities: what the assistant is asked to do.
//!
//! A [`Request`] is built once per invocation. The only permitted mutation is
//! attaching `extra_context` for the single re-query after a failed
//! validation, via [`Request::with_requery_context`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the assistant is being used for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    /// Repair a command that already failed
    #[default]
    Reactive,
    /// Generate a command from a natural-language request
    Proactive,
}

impl RequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Reactive => "reactive",
            RequestMode::Proactive => "proactive",
        }
    }
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reactive" => Ok(RequestMode::Reactive),
            "proactive" => Ok(RequestMode::Proactive),
            other => Err(DomainError::InvalidRequestMode(other.to_string())),
        }
    }
}

/// A single decision request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    command: String,
    error: String,
    exit_code: i32,
    working_directory: PathBuf,
    extra_context: Option<String>,
    mode: RequestMode,
}

impl Request {
    /// Reactive request: repair `command`, which failed with `exit_code`.
    pub fn reactive(
        command: impl Into<String>,
        error: impl Into<String>,
        exit_code: i32,
    ) -> Result<Self, DomainError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        Ok(Self {
            command,
            error: error.into(),
            exit_code,
            working_directory: PathBuf::new(),
            extra_context: None,
            mode: RequestMode::Reactive,
        })
    }

    /// Proactive request: turn a natural-language `query` into a command.
    pub fn proactive(query: impl Into<String>) -> Result<Self, DomainError> {
        let command = query.into();
        if command.trim().is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        Ok(Self {
            command,
            error: String::new(),
            exit_code: 0,
            working_directory: PathBuf::new(),
            extra_context: None,
            mode: RequestMode::Proactive,
        })
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = dir.into();
        self
    }

    /// Copy of this request carrying the previous attempt's validation failure.
    pub fn with_requery_context(&self, previous_suggestion: &str, failure: &str) -> Self {
        let mut next = self.clone();
        next.extra_context = Some(format!(
            "Previous suggestion '{}' was invalid: {}",
            previous_suggestion, failure
        ));
        next
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn working_directory(&self) -> &std::path::Path {
        &self.working_directory
    }

    pub fn extra_context(&self) -> Option<&str> {
        self.extra_context.as_deref()
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    pub fn is_proactive(&self) -> bool {
        self.mode == RequestMode::Proactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactive_request() {
        let req = Request::reactive("kubectl get pod", "error: not found", 1)
            .unwrap()
            .with_working_directory("/tmp");
        assert_eq!(req.mode(), RequestMode::Reactive);
        assert_eq!(req.exit_code(), 1);
        assert_eq!(req.working_directory(), std::path::Path::new("/tmp"));
        assert!(req.extra_context().is_none());
    }

    #[test]
    fn test_empty_command_rejected() {
        assert_eq!(
            Request::reactive("   ", "", 1).unwrap_err(),
            DomainError::EmptyCommand
        );
        assert!(Request::proactive("").is_err());
    }

    #[test]
    fn test_requery_context_leaves_original_untouched() {
        let req = Request::reactive("git psuh", "not a git command", 1).unwrap();
        let retry = req.with_requery_context("git pussh", "'pussh' is not a valid git subcommand");
        assert!(req.extra_context().is_none());
        assert_eq!(
            retry.extra_context(),
            Some(
                "Previous suggestion 'git pussh' was invalid: \
                 'pussh' is not a valid git subcommand"
            )
        );
        assert_eq!(retry.command(), req.command());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Proactive".parse::<RequestMode>().unwrap(), RequestMode::Proactive);
        assert!("sideways".parse::<RequestMode>().is_err());
    }
}
