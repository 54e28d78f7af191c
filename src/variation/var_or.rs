//! Crossover-OR-mutation-OR-replication offspring generation.
//!
//! [`VarOr`] produces each offspring independently: a uniform draw `u` picks
//! crossover when `u < cx`, mutation when `u < cx + mut`, and replication
//! otherwise. Parents are sampled uniformly from the population, and the
//! provenance of every offspring is recorded in [`VariationDiagnostics`].

use super::config::VariationConfig;
use super::diagnostics::{Provenance, VariationDiagnostics};
use super::error::VariationError;
use super::types::{Crossover, Mutation};
use crate::chromosomes::Chromosome;
#[cfg(feature = "parallel")]
use crate::random::derive_seed;
use crate::random::{create_rng, entropy_rng};
use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::marker::PhantomData;
use tracing::instrument;

/// Variation scheduler choosing one of crossover, mutation, or replication
/// per offspring.
///
/// # Usage
///
/// ```ignore
/// let mut variation = VarOr::new(crossover, mutation, 0.5, 0.3)?;
/// let offspring = variation.apply(&population, population.len())?;
/// let counts = variation.diagnostics().counts();
/// ```
///
/// # Probability semantics
///
/// The probabilities are thresholds on a single draw, evaluated in order.
/// When `cx + mut > 1`, replication never fires and mutation only receives
/// the band `[cx, 1)`. They are never renormalized.
pub struct VarOr<C, X, M> {
    crossover: X,
    mutation: M,
    config: VariationConfig,
    rng: StdRng,
    diagnostics: VariationDiagnostics,
    _chromosome: PhantomData<fn() -> C>,
}

impl<C, X, M> VarOr<C, X, M>
where
    C: Chromosome,
    X: Crossover<C>,
    M: Mutation<C>,
{
    /// Creates a scheduler with the given probabilities.
    ///
    /// Fails with [`VariationError::InvalidProbability`] if either
    /// probability lies outside `[0, 1]`.
    pub fn new(
        crossover: X,
        mutation: M,
        crossover_probability: f64,
        mutation_probability: f64,
    ) -> Result<Self, VariationError> {
        let config = VariationConfig::default()
            .with_crossover_probability(crossover_probability)
            .with_mutation_probability(mutation_probability);
        Self::with_config(crossover, mutation, config)
    }

    /// Creates a scheduler from a full configuration.
    pub fn with_config(
        crossover: X,
        mutation: M,
        config: VariationConfig,
    ) -> Result<Self, VariationError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        };
        Ok(Self {
            crossover,
            mutation,
            config,
            rng,
            diagnostics: VariationDiagnostics::default(),
            _chromosome: PhantomData,
        })
    }

    /// Resets the owned generator to a fixed seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = create_rng(seed);
    }

    pub fn config(&self) -> &VariationConfig {
        &self.config
    }

    pub fn crossover_probability(&self) -> f64 {
        self.config.crossover_probability
    }

    pub fn mutation_probability(&self) -> f64 {
        self.config.mutation_probability
    }

    pub fn replication_probability(&self) -> f64 {
        self.config.replication_probability()
    }

    /// Every crossover tag that can appear in the diagnostics.
    pub fn crossover_types(&self) -> &[&'static str] {
        self.crossover.types()
    }

    /// Every mutation tag that can appear in the diagnostics.
    pub fn mutation_types(&self) -> &[&'static str] {
        self.mutation.types()
    }

    /// Provenance of the offspring from the most recent [`apply`](Self::apply).
    pub fn diagnostics(&self) -> &VariationDiagnostics {
        &self.diagnostics
    }

    /// Generates `number_offspring` offspring from `population`.
    ///
    /// The population is only read. Offspring are returned in trial order,
    /// and the diagnostics are rebuilt to describe exactly this call.
    ///
    /// # Errors
    ///
    /// - [`VariationError::PopulationTooSmall`] if a trial cannot sample its
    ///   parents (crossover with fewer than two individuals, or an empty
    ///   population).
    /// - [`VariationError::Operator`] if an operator fails.
    ///
    /// On error the diagnostics are left empty.
    #[instrument(
        level = "debug",
        skip(self, population),
        fields(population_size = population.len(), parallel = self.config.parallel)
    )]
    pub fn apply(
        &mut self,
        population: &[C],
        number_offspring: usize,
    ) -> Result<Vec<C>, VariationError> {
        self.diagnostics.clear();

        #[cfg(feature = "parallel")]
        let trials = if self.config.parallel {
            self.run_parallel(population, number_offspring)?
        } else {
            self.run_sequential(population, number_offspring)?
        };
        #[cfg(not(feature = "parallel"))]
        let trials = self.run_sequential(population, number_offspring)?;

        let mut diagnostics = VariationDiagnostics::with_capacity(number_offspring);
        let mut offspring = Vec::with_capacity(number_offspring);
        for (child, provenance) in trials {
            diagnostics.push(provenance);
            offspring.push(child);
        }
        self.diagnostics = diagnostics;

        let counts = self.diagnostics.counts();
        tracing::debug!(
            crossover = counts.crossover,
            mutation = counts.mutation,
            replication = counts.replication,
            "offspring generated"
        );

        Ok(offspring)
    }

    fn run_sequential(
        &mut self,
        population: &[C],
        number_offspring: usize,
    ) -> Result<Vec<(C, Provenance)>, VariationError> {
        let trial = Trial {
            crossover: &self.crossover,
            mutation: &self.mutation,
            crossover_probability: self.config.crossover_probability,
            mutation_probability: self.config.mutation_probability,
            population,
        };
        let rng = &mut self.rng;
        (0..number_offspring).map(|_| trial.run(&mut *rng)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(
        &mut self,
        population: &[C],
        number_offspring: usize,
    ) -> Result<Vec<(C, Provenance)>, VariationError> {
        let base_seed: u64 = self.rng.random();
        let trial = Trial {
            crossover: &self.crossover,
            mutation: &self.mutation,
            crossover_probability: self.config.crossover_probability,
            mutation_probability: self.config.mutation_probability,
            population,
        };
        (0..number_offspring)
            .into_par_iter()
            .map(|i| {
                let mut rng = create_rng(derive_seed(base_seed, i as u64));
                trial.run(&mut rng)
            })
            .collect()
    }
}

/// Read-only state shared by all trials of one call.
struct Trial<'a, C, X, M> {
    crossover: &'a X,
    mutation: &'a M,
    crossover_probability: f64,
    mutation_probability: f64,
    population: &'a [C],
}

impl<C, X, M> Trial<'_, C, X, M>
where
    C: Chromosome,
    X: Crossover<C>,
    M: Mutation<C>,
{
    fn run<R: Rng>(&self, rng: &mut R) -> Result<(C, Provenance), VariationError> {
        let u: f64 = rng.random();

        if u < self.crossover_probability {
            let (i, j) = sample_pair(self.population.len(), rng)?;
            let outcome =
                self.crossover
                    .crossover(&self.population[i], &self.population[j], rng)?;
            // Only the first child is kept
            let (child, _) = outcome.children;
            let crossover_type = outcome.types.0;
            tracing::trace!(parents = ?(i, j), crossover_type, "crossover");
            return Ok((
                child,
                Provenance::Crossover {
                    parents: (i, j),
                    crossover_type,
                },
            ));
        }

        if u < self.crossover_probability + self.mutation_probability {
            let parent = sample_index(self.population.len(), rng)?;
            let outcome = self.mutation.mutate(&self.population[parent], rng)?;
            tracing::trace!(parent, mutation_type = outcome.mutation_type, "mutation");
            return Ok((
                outcome.child,
                Provenance::Mutation {
                    parent,
                    mutation_type: outcome.mutation_type,
                },
            ));
        }

        let parent = sample_index(self.population.len(), rng)?;
        tracing::trace!(parent, "replication");
        Ok((
            self.population[parent].copy(),
            Provenance::Replication { parent },
        ))
    }
}

/// Samples one index uniformly from `0..len`.
fn sample_index<R: Rng>(len: usize, rng: &mut R) -> Result<usize, VariationError> {
    if len == 0 {
        return Err(VariationError::PopulationTooSmall {
            required: 1,
            actual: 0,
        });
    }
    Ok(rng.random_range(0..len))
}

/// Samples two distinct indices uniformly from `0..len`, without replacement.
fn sample_pair<R: Rng>(len: usize, rng: &mut R) -> Result<(usize, usize), VariationError> {
    if len < 2 {
        return Err(VariationError::PopulationTooSmall {
            required: 2,
            actual: len,
        });
    }
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len - 1);
    if j >= i {
        j += 1;
    }
    Ok((i, j))
}

// ============================================================================
// Tests
// ============================================================================
