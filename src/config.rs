//! Runtime engine configuration.

use crate::constants::{DEFAULT_SIZE, KOMI, MAX_CHILDREN, N_SIMS, ROLLOUT_DEPTH, UCB_C};

/// Parameters consumed by the search and the turn loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Board size (NxN).
    pub size: usize,
    /// Search iterations per move decision.
    pub simulations: usize,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Maximum plies per rollout.
    pub rollout_depth: usize,
    /// Children kept per node when pruning during selection.
    pub max_children: usize,
    /// Compensation points for White.
    pub komi: f64,
    /// Seed for the controller's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            simulations: N_SIMS,
            exploration: UCB_C,
            rollout_depth: ROLLOUT_DEPTH,
            max_children: MAX_CHILDREN,
            komi: KOMI,
            seed: None,
        }
    }
}

impl Config {
    /// Small, seeded config for tests.
    pub fn for_testing() -> Self {
        Self {
            simulations: 50,
            rollout_depth: 10,
            seed: Some(42),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = Config::default();
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.simulations, 100);
        assert_eq!(config.exploration, 1.41);
        assert_eq!(config.rollout_depth, 30);
        assert_eq!(config.max_children, 10);
        assert_eq!(config.komi, 6.5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_for_testing_is_seeded() {
        let config = Config::for_testing();
        assert_eq!(config.seed, Some(42));
        assert!(config.simulations < N_SIMS);
    }
}
