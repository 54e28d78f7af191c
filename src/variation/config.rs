//! Variation configuration.
//!
//! [`VariationConfig`] holds the operator probabilities and execution
//! settings of [`VarOr`](super::VarOr).

use super::error::{check_probability, VariationError};

/// Configuration for the crossover-or-mutation-or-replication scheduler.
///
/// # Defaults
///
/// ```
/// use u_variation::variation::VariationConfig;
///
/// let config = VariationConfig::default();
/// assert!((config.crossover_probability - 0.4).abs() < 1e-12);
/// assert!((config.mutation_probability - 0.4).abs() < 1e-12);
/// assert!(!config.parallel);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_variation::variation::VariationConfig;
///
/// let config = VariationConfig::default()
///     .with_crossover_probability(0.5)
///     .with_mutation_probability(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct VariationConfig {
    /// Threshold below which a trial uses crossover (0.0–1.0).
    pub crossover_probability: f64,

    /// Width of the mutation band above the crossover threshold (0.0–1.0).
    ///
    /// The sum with `crossover_probability` may exceed 1; replication then
    /// never fires and mutation receives only what is left below 1.
    pub mutation_probability: f64,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Only honored when the crate is built with the `parallel` feature;
    /// otherwise trials always run sequentially.
    ///
    /// Each trial draws from its own generator stream, so a seeded run gives
    /// the same offspring regardless of thread count, though not the same
    /// offspring as a sequential run with that seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from operating-system entropy.
    pub seed: Option<u64>,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            crossover_probability: 0.4,
            mutation_probability: 0.4,
            parallel: false,
            seed: None,
        }
    }
}

impl VariationConfig {
    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Probability that a trial replicates its parent unchanged.
    ///
    /// `max(0, 1 - crossover_probability - mutation_probability)`.
    pub fn replication_probability(&self) -> f64 {
        (1.0 - self.crossover_probability - self.mutation_probability).max(0.0)
    }

    /// Validates the configuration.
    ///
    /// Probabilities are checked individually. Their sum is not constrained.
    pub fn validate(&self) -> Result<(), VariationError> {
        check_probability("crossover_probability", self.crossover_probability)?;
        check_probability("mutation_probability", self.mutation_probability)?;
        Ok(())
    }
}
