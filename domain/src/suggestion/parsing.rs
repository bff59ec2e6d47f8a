//! Completion parsing and rendering.
//!
//! The prompt contract asks the model to answer with:
//!
//! ```text
//! ✓ <command>
//! Root: <one sentence>
//! Tip: <optional>
//! ```
//!
//! Parsing never fails. Lines are trimmed and unrecognized lines are ignored.
//! The first `✓` line is the command; for `Root:` and `Tip:` the last
//! occurrence wins. A reply without the success marker yields an empty
//! command.

/// Marker that must start the command line of a completion
pub const SUCCESS_MARKER: &str = "✓";

/// Prefix of the root-cause line
pub const ROOT_PREFIX: &str = "Root:";

/// Prefix of the optional tip line
pub const TIP_PREFIX: &str = "Tip:";

/// Structured fields extracted from free-text model output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCompletion {
    pub command: String,
    pub root_cause: String,
    pub tip: String,
}

/// Parse a raw completion into its structured fields.
pub fn parse_completion(text: &str) -> ParsedCompletion {
    let mut command: Option<String> = None;
    let mut root_cause = String::new();
    let mut tip = String::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix(SUCCESS_MARKER) {
            command.get_or_insert_with(|| rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(ROOT_PREFIX) {
            root_cause = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(TIP_PREFIX) {
            tip = rest.trim().to_string();
        }
    }

    ParsedCompletion {
        command: command.unwrap_or_default(),
        root_cause,
        tip,
    }
}

/// Render fields back into the marker format (used as the cached payload).
pub fn render_completion(command: &str, root_cause: &str, tip: &str) -> String {
    let mut text = format!("{} {}\n{} {}", SUCCESS_MARKER, command, ROOT_PREFIX, root_cause);
    if !tip.is_empty() {
        text.push_str(&format!("\n{} {}", TIP_PREFIX, tip));
    }
    text
}
