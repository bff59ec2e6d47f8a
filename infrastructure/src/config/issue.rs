//! Configuration issues reported instead of failing the load

use serde::Serialize;

/// A configuration value that was ignored in favour of its default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// Dotted key, e.g. `activation.mode`
    pub field: String,
    pub value: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn invalid_enum(field: &str, value: &str, valid: &[&str], fallback: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            message: format!(
                "{}: unknown value '{}' (expected one of: {}), falling back to '{}'",
                field,
                value,
                valid.join(", "),
                fallback
            ),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
