//! Search configuration for the route planner.

use std::time::Duration;

/// Default penalty per line change, in minutes.
pub const DEFAULT_TRANSFER_PENALTY: u32 = 6;

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minutes added each time the route changes line.
    pub transfer_penalty: u32,

    /// Maximum number of (stop, line) states to settle in one search.
    /// Searches that would settle more are abandoned.
    pub max_expansions: usize,

    /// Wall-clock budget for a single search when run by the server (milliseconds).
    pub timeout_ms: u64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_penalty: u32, max_expansions: usize, timeout_ms: u64) -> Self {
        Self {
            transfer_penalty,
            max_expansions,
            timeout_ms,
        }
    }

    /// Returns the search timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: DEFAULT_TRANSFER_PENALTY,
            max_expansions: 1_000_000,
            timeout_ms: 2_000,
        }
    }
}
