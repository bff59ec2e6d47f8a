//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod activation;
mod provider;

pub use activation::{ActivationMode, ActivationPolicy};
pub use provider::ProviderKind;
