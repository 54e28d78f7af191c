//! Offspring generation by stochastic variation.
//!
//! A variation step turns a population into offspring by applying genetic
//! operators. [`VarOr`] decides per offspring whether to apply crossover,
//! mutation, or plain replication, and records where every offspring came
//! from.
//!
//! # Core Traits
//!
//! - [`Crossover`]: Two parents in, two children and their type tags out
//! - [`Mutation`]: One parent in, one child and its type tag out
//!
//! # Key Types
//!
//! - [`VariationConfig`]: Operator probabilities, parallelism, seed
//! - [`VarOr`]: The crossover-or-mutation-or-replication scheduler
//! - [`VariationDiagnostics`]: Per-offspring parents and operator tags
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 3
//! - Fortin et al. (2012), "DEAP: Evolutionary Algorithms Made Easy",
//!   JMLR 13 (the `varOr` variation scheme)

mod config;
mod diagnostics;
mod error;
mod types;
mod var_or;

pub use config::VariationConfig;
pub use diagnostics::{
    Operation, OperationCounts, ParentIndices, Provenance, VariationDiagnostics,
};
pub(crate) use error::check_probability;
pub use error::{OperatorError, VariationError};
pub use types::{Crossover, CrossoverOutcome, Mutation, MutationOutcome};
pub use var_or::VarOr;
