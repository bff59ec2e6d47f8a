//! Safety checks independent of the tool being run

pub mod scanner;

pub use scanner::{DANGER_PATTERNS, DangerFinding, DangerPattern, DangerScanner, Severity};
