//! String utilities for the domain layer.

/// First line of a possibly multi-line text (everything before the first `\n`).
pub fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or("")
}

/// First whitespace-separated token, or `""` for blank input.
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
