//! Progress notification port
//!
//! Defines the interface for reporting progress while a decision is made.

use shellfix_domain::{Model, ValidationOutcome};

/// Callback for progress updates during one decision
///
/// Implementations live in the presentation layer (spinner, quiet mode).
pub trait DecisionProgress: Send + Sync {
    /// Called before a backend query. `attempt` is 1 for the first query, 2 for the re-query.
    fn on_query_start(&self, model: &Model, attempt: usize);

    /// Called when a backend query finishes, successfully or not
    fn on_query_complete(&self, model: &Model, success: bool);

    /// Called when the answer is served from the cache
    fn on_cache_hit(&self) {}

    /// Called after each validation pass
    fn on_validation(&self, _outcome: &ValidationOutcome) {}

    /// Called when a blocking outcome triggers the re-query
    fn on_requery(&self, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DecisionProgress for NoProgress {
    fn on_query_start(&self, _model: &Model, _attempt: usize) {}
    fn on_query_complete(&self, _model: &Model, _success: bool) {}
}
