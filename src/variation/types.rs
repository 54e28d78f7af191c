//! Operator contracts consumed by the variation scheduler.
//!
//! [`Crossover`] and [`Mutation`] are capability traits: one method that
//! produces children, and one accessor for the full vocabulary of type tags
//! the operator can report. The tag that fired is returned alongside the
//! children instead of being stored on the operator, so a single operator
//! instance can serve concurrent trials.

use super::error::OperatorError;
use crate::chromosomes::Chromosome;
use rand::Rng;

/// Result of one crossover call.
#[derive(Debug, Clone)]
pub struct CrossoverOutcome<C> {
    /// The two children, independent of both parents.
    pub children: (C, C),

    /// The type tag that produced each child, in the same order.
    pub types: (&'static str, &'static str),
}

/// Result of one mutation call.
#[derive(Debug, Clone)]
pub struct MutationOutcome<C> {
    /// The mutated child, independent of the parent.
    pub child: C,

    /// The type tag of the mutation that fired.
    pub mutation_type: &'static str,
}

/// Recombines two parents into two children.
///
/// Implementations may randomize internally among several strategies; the
/// strategy used is reported through [`CrossoverOutcome::types`]. Every tag
/// that can ever be reported must appear in [`types`](Crossover::types).
///
/// Parent order carries no meaning for the scheduler. Symmetry is up to the
/// operator.
pub trait Crossover<C: Chromosome>: Send + Sync {
    /// All type tags this operator can report.
    fn types(&self) -> &[&'static str];

    /// Produces two children from two parents.
    fn crossover<R: Rng>(
        &self,
        parent_1: &C,
        parent_2: &C,
        rng: &mut R,
    ) -> Result<CrossoverOutcome<C>, OperatorError>;
}

/// Perturbs one parent into one child.
pub trait Mutation<C: Chromosome>: Send + Sync {
    /// All type tags this operator can report.
    fn types(&self) -> &[&'static str];

    /// Produces a mutated child from a parent.
    fn mutate<R: Rng>(&self, parent: &C, rng: &mut R) -> Result<MutationOutcome<C>, OperatorError>;
}
