//! Interactive prompts

pub mod menu;

pub use menu::{FailureMenu, MenuChoice, MenuSelection, parse_choice};
