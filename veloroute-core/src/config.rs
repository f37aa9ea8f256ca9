//! Search parameters shared by both engines.
//!
//! [`SearchConfig`] is a plain value with builder-style setters. Engines call
//! [`SearchConfig::validate`] before every run so a bad value surfaces as a
//! [`ConfigError`] rather than a silent degenerate search.

use crate::{ConfigError, ScoreWeighting};

/// How the CAS search sizes the budget reclaimed by removing an arc.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BudgetMode {
    /// Use the full reclaimed budget.
    #[default]
    Normal,
    /// Scale the reclaimed budget by a constant factor.
    FixedPercentage {
        /// Factor within `(0, 1]`.
        percentage: f64,
    },
    /// Ramp the factor linearly from `percentage` towards `1.0` with the
    /// iteration count.
    ///
    /// The last iteration always searches with the full reclaimed budget.
    Incremental {
        /// Starting factor within `(0, 1]`.
        percentage: f64,
    },
}

impl BudgetMode {
    /// Scale `budget` for 1-based `iteration` out of `max_iterations`.
    ///
    /// # Examples
    /// ```
    /// use veloroute_core::BudgetMode;
    ///
    /// let mode = BudgetMode::Incremental { percentage: 0.5 };
    /// assert_eq!(mode.scale(100.0, 10, 10), 100.0);
    /// assert_eq!(BudgetMode::FixedPercentage { percentage: 0.5 }.scale(100.0, 1, 10), 50.0);
    /// ```
    pub fn scale(&self, budget: f64, iteration: usize, max_iterations: usize) -> f64 {
        match self {
            Self::Normal => budget,
            Self::FixedPercentage { percentage } => budget * percentage,
            Self::Incremental { percentage } => {
                let progress = iteration as f64 / max_iterations.max(1) as f64;
                budget * (percentage + (1.0 - percentage) * progress)
            }
        }
    }
}

/// Parameters for a route search.
///
/// # Examples
/// ```
/// use veloroute_core::{BudgetMode, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_max_cost(5_000.0)
///     .with_max_iterations(20)
///     .with_seed(7)
///     .with_budget_mode(BudgetMode::FixedPercentage { percentage: 0.8 });
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Route length budget in metres.
    pub max_cost: f64,
    /// Minimum length of a backtracking sub-route in metres.
    pub min_cost: f64,
    /// Number of main-loop iterations.
    pub max_iterations: usize,
    /// Arcs must score strictly above this to enter a CAS.
    pub min_road_score: f64,
    /// Arcs must be strictly longer than this, in metres, to enter a CAS.
    pub min_road_length: f64,
    /// Depth cap for the backtracking search.
    pub max_depth: usize,
    /// Seed for the run's random generator.
    pub seed: u64,
    /// Reclaimed-budget scaling for the CAS search.
    pub budget_mode: BudgetMode,
    /// Edge score weighting.
    pub weighting: ScoreWeighting,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_cost: 40_000.0,
            min_cost: 0.0,
            max_iterations: 50,
            min_road_score: 0.25,
            min_road_length: 10.0,
            max_depth: 10,
            seed: 0,
            budget_mode: BudgetMode::Normal,
            weighting: ScoreWeighting::Raw,
        }
    }
}

impl SearchConfig {
    /// Set the route length budget.
    #[must_use]
    pub const fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Set the backtracking minimum sub-route length.
    #[must_use]
    pub const fn with_min_cost(mut self, min_cost: f64) -> Self {
        self.min_cost = min_cost;
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the minimum qualifying road score.
    #[must_use]
    pub const fn with_min_road_score(mut self, min_road_score: f64) -> Self {
        self.min_road_score = min_road_score;
        self
    }

    /// Set the minimum qualifying road length.
    #[must_use]
    pub const fn with_min_road_length(mut self, min_road_length: f64) -> Self {
        self.min_road_length = min_road_length;
        self
    }

    /// Set the backtracking depth cap.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reclaimed-budget scaling.
    #[must_use]
    pub const fn with_budget_mode(mut self, budget_mode: BudgetMode) -> Self {
        self.budget_mode = budget_mode;
        self
    }

    /// Set the edge score weighting.
    #[must_use]
    pub const fn with_weighting(mut self, weighting: ScoreWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Check every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_cost.is_finite() || self.max_cost <= 0.0 {
            return Err(ConfigError::InvalidMaxCost(self.max_cost));
        }
        if !self.min_cost.is_finite() || self.min_cost < 0.0 || self.min_cost > self.max_cost {
            return Err(ConfigError::InvalidMinCost(self.min_cost));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        for threshold in [self.min_road_score, self.min_road_length] {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ConfigError::InvalidThreshold(threshold));
            }
        }
        if let ScoreWeighting::Thresholded { cutoff } = self.weighting {
            if !cutoff.is_finite() {
                return Err(ConfigError::InvalidThreshold(cutoff));
            }
        }
        match self.budget_mode {
            BudgetMode::Normal => Ok(()),
            BudgetMode::FixedPercentage { percentage } | BudgetMode::Incremental { percentage } => {
                if percentage > 0.0 && percentage <= 1.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidPercentage(percentage))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert_eq!(SearchConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(SearchConfig::default().with_max_cost(0.0), ConfigError::InvalidMaxCost(0.0))]
    #[case(SearchConfig::default().with_min_cost(-1.0), ConfigError::InvalidMinCost(-1.0))]
    #[case(
        SearchConfig::default().with_max_cost(10.0).with_min_cost(20.0),
        ConfigError::InvalidMinCost(20.0)
    )]
    #[case(SearchConfig::default().with_max_iterations(0), ConfigError::ZeroIterations)]
    #[case(SearchConfig::default().with_max_depth(0), ConfigError::ZeroDepth)]
    #[case(
        SearchConfig::default().with_min_road_length(-5.0),
        ConfigError::InvalidThreshold(-5.0)
    )]
    #[case(
        SearchConfig::default().with_budget_mode(BudgetMode::FixedPercentage { percentage: 1.5 }),
        ConfigError::InvalidPercentage(1.5)
    )]
    #[case(
        SearchConfig::default().with_budget_mode(BudgetMode::Incremental { percentage: 0.0 }),
        ConfigError::InvalidPercentage(0.0)
    )]
    fn rejects_invalid_parameters(#[case] config: SearchConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[rstest]
    fn rejects_nan_max_cost() {
        let config = SearchConfig::default().with_max_cost(f64::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxCost(_))));
    }

    #[rstest]
    #[case(1, 55.0)]
    #[case(5, 75.0)]
    #[case(10, 100.0)]
    fn incremental_ramps_to_full_budget(#[case] iteration: usize, #[case] expected: f64) {
        let mode = BudgetMode::Incremental { percentage: 0.5 };
        assert!((mode.scale(100.0, iteration, 10) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn normal_mode_keeps_budget() {
        assert_eq!(BudgetMode::Normal.scale(42.0, 3, 10), 42.0);
    }
}
