//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the backend query deadline.

use std::time::Duration;

/// Default deadline for a single backend query
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases like the timeout for one backend query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Maximum time to wait for one backend reply.
    pub timeout: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(seconds),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, the default deadline applies.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        match seconds {
            Some(s) if s > 0 => Self::with_timeout_seconds(s),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sixty_seconds() {
        assert_eq!(BehaviorConfig::default().timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_timeout_seconds() {
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(5)).timeout,
            Duration::from_secs(5)
        );
        assert_eq!(BehaviorConfig::from_timeout_seconds(Some(0)), BehaviorConfig::default());
        assert_eq!(BehaviorConfig::from_timeout_seconds(None), BehaviorConfig::default());
    }
}
