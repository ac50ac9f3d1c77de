//! Collaborator call budgets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Matching authority settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// How long a submission waits for a match decision.
    #[serde(default = "default_matching_timeout_ms")]
    pub timeout_ms: u64,
}

impl MatchingConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_matching_timeout_ms(),
        }
    }
}

/// Order lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Budget for a single directory read.
    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,
}

impl LookupConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

const fn default_matching_timeout_ms() -> u64 {
    2_000
}

const fn default_lookup_timeout_ms() -> u64 {
    1_000
}
