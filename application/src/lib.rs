//! Application layer for shellfix
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    backend::{BackendError, SuggestionBackend},
    progress::{DecisionProgress, NoProgress},
    suggestion_cache::{CacheError, NoCache, SuggestionCache},
};
pub use use_cases::activation::{Activation, evaluate_activation};
pub use use_cases::analyze_failure::{AnalyzeError, AnalyzeFailureUseCase};
pub use use_cases::decision::{AcceptedSuggestion, Decision, DecisionContext, RejectedAttempt};
pub use use_cases::generate_command::GenerateCommandUseCase;
