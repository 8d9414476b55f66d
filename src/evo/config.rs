//! Evolution loop configuration.

use crate::EvoError;
use std::time::Duration;

/// Configuration for [`Evo::evolve`](super::Evo::evolve).
///
/// All fields only control cadence and stopping; none of them changes what
/// a single iteration does.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_pareto::evo::EvoConfig;
///
/// let config = EvoConfig::default()
///     .with_max_iterations(100_000)
///     .with_prune_interval(100)
///     .with_status_interval(1000)
///     .with_time_limit(Duration::from_secs(60))
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvoConfig {
    /// Maximum number of agent invocations.
    pub max_iterations: usize,

    /// Dominated members are pruned every `prune_interval` iterations,
    /// starting at iteration 0.
    pub prune_interval: usize,

    /// A status report is emitted every `status_interval` iterations,
    /// starting at iteration 0.
    pub status_interval: usize,

    /// Wall-clock budget, checked at the top of every iteration. `None`
    /// disables it.
    ///
    /// The loop can overshoot by at most one iteration.
    pub time_limit: Option<Duration>,

    /// Extra prune trigger: when the population grows past this size
    /// between scheduled prunes, it is pruned immediately. `None` leaves
    /// growth unbounded between prunes.
    ///
    /// The frontier itself is never truncated, so a population of mutually
    /// non-dominated members can still exceed the cap.
    pub max_population: Option<usize>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for EvoConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1,
            prune_interval: 100,
            status_interval: 1000,
            time_limit: Some(Duration::from_secs(300)),
            max_population: None,
            seed: None,
        }
    }
}

impl EvoConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_prune_interval(mut self, n: usize) -> Self {
        self.prune_interval = n;
        self
    }

    pub fn with_status_interval(mut self, n: usize) -> Self {
        self.status_interval = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }

    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EvoError> {
        if self.prune_interval == 0 {
            return Err(EvoError::InvalidConfig(
                "prune_interval must be positive".into(),
            ));
        }
        if self.status_interval == 0 {
            return Err(EvoError::InvalidConfig(
                "status_interval must be positive".into(),
            ));
        }
        if self.max_population == Some(0) {
            return Err(EvoError::InvalidConfig(
                "max_population must be positive".into(),
            ));
        }
        Ok(())
    }
}
