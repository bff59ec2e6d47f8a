//! Backend provider selection value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which backend family answers queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local inference server over HTTP
    #[default]
    Ollama,
    /// External agent process
    OpenCode,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenCode => "opencode",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "opencode" => Ok(ProviderKind::OpenCode),
            other => Err(DomainError::InvalidProvider(other.to_string())),
        }
    }
}
