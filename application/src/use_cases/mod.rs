//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod activation;
pub mod analyze_failure;
pub mod decision;
pub mod generate_command;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;
