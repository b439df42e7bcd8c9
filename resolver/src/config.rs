//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Tuning for query resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum results returned; 0 returns every match.
    pub max_results: usize,

    /// Matches scoring below this are dropped.
    pub min_score: i64,

    /// How strongly usage history lifts a match. 0 disables it.
    pub history_boost: f64,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self {
            max_results: 50,
            min_score: 0,
            history_boost: 1.0,
        }
    }

    /// Set the result limit.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the minimum score.
    pub fn with_min_score(mut self, min_score: i64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the history boost; negative values are treated as 0.
    pub fn with_history_boost(mut self, boost: f64) -> Self {
        self.history_boost = boost.max(0.0);
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
