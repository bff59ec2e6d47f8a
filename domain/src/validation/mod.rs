//! Tool-aware validation of suggested commands
//!
//! Each validator runs, short-circuiting on the first failure:
//! alias expansion, hallucinated-flag table, subcommand allow-list,
//! dangerous-operation checks, common-mistake checks.

pub mod chain;
pub mod outcome;
pub mod rules;
pub mod tools;
pub mod validator;

pub use chain::ValidatorChain;
pub use outcome::{BLOCKED_MARKER, ValidationOutcome, WARNING_MARKER};
pub use validator::CommandValidator;
