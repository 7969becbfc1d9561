//! Tunable execution parameters.
//!
//! These are the knobs the outer configuration layer resolves and injects;
//! the use cases themselves never read files or environment variables.

use quadbot_domain::DEFAULT_MAX_STEPS;
use serde::{Deserialize, Serialize};

/// Bounds for one assistant turn and for the normalization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionParams {
    /// Maximum planning steps per turn
    pub max_steps: usize,
    /// Candidates kept per controlled list during fuzzy ranking
    pub fuzzy_top_n: usize,
    /// Matches returned by the plain/subject format resolvers
    pub resolver_match_limit: usize,
    /// Curriculum records returned before truncation
    pub curriculum_record_limit: usize,
    /// Default forward window for event queries, in days
    pub default_future_days: u32,
    /// Byte cap applied to raw event feed output before observation
    pub event_feed_max_bytes: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            fuzzy_top_n: 10,
            resolver_match_limit: 5,
            curriculum_record_limit: 5,
            default_future_days: 45,
            event_feed_max_bytes: 16 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_bounded() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(params.fuzzy_top_n, 10);
        assert_eq!(params.curriculum_record_limit, 5);
        assert!(params.event_feed_max_bytes > 0);
    }
}
