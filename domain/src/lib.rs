//! Domain layer for shellfix
//!
//! This crate contains the decision rules of the assistant: which model to
//! ask, how to read its answer, and whether the answer can be trusted.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Request modes
//!
//! - **Reactive**: repair a command that just failed (command, error, exit code)
//! - **Proactive**: turn a natural-language request into a command
//!
//! ## Trust pipeline
//!
//! A model completion becomes a [`Suggestion`], is checked by the
//! [`ValidatorChain`], rated by [`confidence::score`], and must pass the
//! [`DangerScanner`] before it can be shown or cached.

pub mod cache;
pub mod confidence;
pub mod config;
pub mod core;
pub mod prompt;
pub mod request;
pub mod routing;
pub mod safety;
pub mod suggestion;
pub mod validation;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheStats, fingerprint};
pub use confidence::{ConfidenceResult, ConfidenceTier, command_complexity};
pub use config::{ActivationMode, ActivationPolicy, ProviderKind};
pub use core::{error::DomainError, model::Model};
pub use prompt::PromptTemplate;
pub use request::{Request, RequestMode};
pub use routing::{Router, RouterRule};
pub use safety::{DangerFinding, DangerScanner, Severity};
pub use suggestion::Suggestion;
pub use validation::{CommandValidator, ValidationOutcome, ValidatorChain};
