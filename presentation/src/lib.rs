//! Presentation layer for shellfix
//!
//! This crate contains the CLI definition, the console formatter,
//! progress reporters, and the interactive failure menu.

pub mod cli;
pub mod interaction;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{CacheAction, Cli, Command};
pub use interaction::{FailureMenu, MenuChoice};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
