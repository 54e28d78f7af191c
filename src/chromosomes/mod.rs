//! Chromosome capability and a ready-made chromosome family.
//!
//! # Core Traits
//!
//! - [`Chromosome`]: A candidate solution with an optional fitness and an
//!   independent copy operation
//!
//! # Key Types
//!
//! - [`MultipleValueChromosome`]: Fixed-length vector of genes
//! - [`MultipleValueCrossover`]: Single-point and uniform crossover
//! - [`MultipleValueMutation`]: Point, swap, and invert mutation

mod multiple_values;
mod operators;
mod types;

pub use multiple_values::{MultipleValueChromosome, ValueGenerator};
pub use operators::{
    CrossoverStrategy, MultipleValueCrossover, MultipleValueMutation, MutationStrategy,
};
pub use types::Chromosome;
