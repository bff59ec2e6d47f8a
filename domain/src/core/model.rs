//! Model value object representing a language-model identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known language models (Value Object)
///
/// Local models are addressed by their Ollama tag, agent-process models by a
/// `provider/model` identifier. Anything else is carried as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Local inference models
    Qwen3_8B,
    Qwen3_4B,
    Gemma3_4B,
    Qwen3_1_7B,
    Gemma3_1B,
    // Agent-process models
    ClaudeSonnet4,
    ClaudeHaiku35,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Qwen3_8B => "qwen3:8b-q4_K_M",
            Model::Qwen3_4B => "qwen3:4b-q4_K_M",
            Model::Gemma3_4B => "gemma3:4b-it-q4_K_M",
            Model::Qwen3_1_7B => "qwen3:1.7b-q4_K_M",
            Model::Gemma3_1B => "gemma3:1b-it-q4_K_M",
            Model::ClaudeSonnet4 => "anthropic/claude-sonnet-4-20250514",
            Model::ClaudeHaiku35 => "anthropic/claude-3-5-haiku-20241022",
            Model::Custom(s) => s,
        }
    }

    /// Whether the identifier carries a `provider/` namespace.
    ///
    /// The agent-process backend only passes an explicit model flag for
    /// namespaced identifiers.
    pub fn is_namespaced(&self) -> bool {
        self.as_str().contains('/')
    }

    /// Check if this is a local inference model
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Model::Qwen3_8B
                | Model::Qwen3_4B
                | Model::Gemma3_4B
                | Model::Qwen3_1_7B
                | Model::Gemma3_1B
        )
    }
}

impl Default for Model {
    /// Returns the lightweight local default (Qwen3 4B)
    fn default() -> Self {
        Model::Qwen3_4B
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "qwen3:8b-q4_K_M" => Model::Qwen3_8B,
            "qwen3:4b-q4_K_M" => Model::Qwen3_4B,
            "gemma3:4b-it-q4_K_M" => Model::Gemma3_4B,
            "qwen3:1.7b-q4_K_M" => Model::Qwen3_1_7B,
            "gemma3:1b-it-q4_K_M" => Model::Gemma3_1B,
            "anthropic/claude-sonnet-4-20250514" => Model::ClaudeSonnet4,
            "anthropic/claude-3-5-haiku-20241022" => Model::ClaudeHaiku35,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Infallible
        Ok(s.parse().unwrap_or_else(|never: std::convert::Infallible| match never {}))
    }
}
