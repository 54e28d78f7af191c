//! Stochastic variation for evolutionary symbolic regression.
//!
//! Evolves populations of candidate equations by generating offspring with
//! pluggable genetic operators:
//!
//! - **Variation scheduling**: [`VarOr`](variation::VarOr) picks crossover,
//!   mutation, or replication per offspring from fixed thresholds and
//!   records the parents and operator type of every offspring.
//! - **Operator contracts**: [`Crossover`](variation::Crossover) and
//!   [`Mutation`](variation::Mutation) traits that report the strategy that
//!   fired alongside their children.
//! - **Chromosomes**: the [`Chromosome`](chromosomes::Chromosome) capability
//!   and a generic fixed-length [`MultipleValueChromosome`](chromosomes::MultipleValueChromosome)
//!   with its operators.
//!
//! # Architecture
//!
//! Population initialization, fitness evaluation, selection, and the
//! generational loop live in consumers. This crate only turns a population
//! into offspring and never mutates the population it reads.
//!
//! # Example
//!
//! ```
//! use rand::{Rng, RngCore};
//! use std::sync::Arc;
//! use u_variation::chromosomes::{
//!     MultipleValueChromosome, MultipleValueCrossover, MultipleValueMutation, ValueGenerator,
//! };
//! use u_variation::random::create_rng;
//! use u_variation::variation::{VarOr, VariationConfig};
//!
//! let generator: ValueGenerator<f64> =
//!     Arc::new(|rng: &mut dyn RngCore| rng.random_range(-1.0..1.0));
//! let mut rng = create_rng(42);
//! let population: Vec<_> = (0..10)
//!     .map(|_| MultipleValueChromosome::random(8, &generator, &mut rng))
//!     .collect();
//!
//! let config = VariationConfig::default()
//!     .with_crossover_probability(0.5)
//!     .with_mutation_probability(0.3)
//!     .with_seed(7);
//! let mut variation = VarOr::with_config(
//!     MultipleValueCrossover::single_point(),
//!     MultipleValueMutation::new(generator),
//!     config,
//! )?;
//!
//! let offspring = variation.apply(&population, 10)?;
//! assert_eq!(offspring.len(), 10);
//! assert_eq!(variation.diagnostics().len(), 10);
//! # Ok::<(), u_variation::variation::VariationError>(())
//! ```

pub mod chromosomes;
pub mod random;
pub mod variation;
