//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Invalid activation mode: {0}")]
    InvalidActivationMode(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Invalid request mode: {0}")]
    InvalidRequestMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyCommand.to_string(), "Empty command");
        assert_eq!(
            DomainError::InvalidProvider("bard".to_string()).to_string(),
            "Invalid provider: bard"
        );
    }
}
