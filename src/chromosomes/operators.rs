//! Crossover and mutation operators for [`MultipleValueChromosome`].
//!
//! Both operators hold a weighted list of strategies and draw one per call.
//! The strategy that fired is reported as the type tag of the result.
//!
//! # Crossover Strategies
//!
//! - [`CrossoverStrategy::SinglePoint`] (`"single_point"`): cut at a random
//!   point and exchange tails
//! - [`CrossoverStrategy::Uniform`] (`"uniform"`): pick each gene from either
//!   parent independently
//!
//! # Mutation Strategies
//!
//! - [`MutationStrategy::Point`] (`"point"`): regenerate one gene, O(1)
//! - [`MutationStrategy::Swap`] (`"swap"`): exchange two random positions, O(1)
//! - [`MutationStrategy::Invert`] (`"invert"`): reverse a random segment, O(n)
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::multiple_values::{MultipleValueChromosome, ValueGenerator};
use crate::variation::{
    check_probability, Crossover, CrossoverOutcome, Mutation, MutationOutcome, OperatorError,
    VariationError,
};
use rand::Rng;
use tracing::instrument;

/// How two parents are recombined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossoverStrategy {
    /// Cut point drawn from `1..len`; genes before it stay, genes after it
    /// are exchanged.
    SinglePoint,

    /// Each gene of the first child comes from the first parent with the
    /// given probability; the second child receives the complementary gene.
    Uniform {
        /// Probability of keeping the first parent's gene (0.0 to 1.0)
        probability: f64,
    },
}

impl CrossoverStrategy {
    /// The type tag reported when this strategy fires.
    pub fn tag(&self) -> &'static str {
        match self {
            CrossoverStrategy::SinglePoint => "single_point",
            CrossoverStrategy::Uniform { .. } => "uniform",
        }
    }
}

/// How one parent is perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStrategy {
    Point,
    Swap,
    Invert,
}

impl MutationStrategy {
    /// The type tag reported when this strategy fires.
    pub fn tag(&self) -> &'static str {
        match self {
            MutationStrategy::Point => "point",
            MutationStrategy::Swap => "swap",
            MutationStrategy::Invert => "invert",
        }
    }
}

/// Weighted set of strategies with the tag vocabulary they can produce.
#[derive(Debug, Clone)]
struct StrategyTable<S> {
    entries: Vec<(S, f64)>,
    total_weight: f64,
    types: Vec<&'static str>,
}

impl<S: Copy> StrategyTable<S> {
    fn new(entries: Vec<(S, f64)>, tag: impl Fn(&S) -> &'static str) -> Result<Self, VariationError> {
        if entries.is_empty() {
            return Err(VariationError::NoStrategies);
        }
        let mut types = Vec::new();
        for (strategy, weight) in &entries {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(VariationError::InvalidWeight { value: *weight });
            }
            let t = tag(strategy);
            if !types.contains(&t) {
                types.push(t);
            }
        }
        let total_weight: f64 = entries.iter().map(|(_, w)| w).sum();
        if !total_weight.is_finite() {
            return Err(VariationError::InvalidWeight {
                value: total_weight,
            });
        }
        Ok(Self {
            entries,
            total_weight,
            types,
        })
    }

    /// Roulette pick proportional to weight.
    fn pick<R: Rng>(&self, rng: &mut R) -> S {
        if self.entries.len() == 1 {
            return self.entries[0].0;
        }
        let mut remaining = rng.random_range(0.0..self.total_weight);
        for &(strategy, weight) in &self.entries {
            if remaining < weight {
                return strategy;
            }
            remaining -= weight;
        }
        // Floating-point residue lands on the last entry
        self.entries[self.entries.len() - 1].0
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Crossover for [`MultipleValueChromosome`].
///
/// # Examples
///
/// ```
/// use u_variation::chromosomes::{CrossoverStrategy, MultipleValueCrossover};
///
/// let single = MultipleValueCrossover::single_point();
/// let mixed = MultipleValueCrossover::new(vec![
///     (CrossoverStrategy::SinglePoint, 3.0),
///     (CrossoverStrategy::Uniform { probability: 0.5 }, 1.0),
/// ])?;
/// # Ok::<(), u_variation::variation::VariationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MultipleValueCrossover {
    table: StrategyTable<CrossoverStrategy>,
}

impl MultipleValueCrossover {
    /// Builds a crossover drawing among weighted strategies.
    ///
    /// Fails if the list is empty, a weight is not positive, or a uniform
    /// probability lies outside `[0, 1]`.
    pub fn new(strategies: Vec<(CrossoverStrategy, f64)>) -> Result<Self, VariationError> {
        for (strategy, _) in &strategies {
            if let CrossoverStrategy::Uniform { probability } = strategy {
                check_probability("uniform crossover probability", *probability)?;
            }
        }
        let table = StrategyTable::new(strategies, CrossoverStrategy::tag)?;
        Ok(Self { table })
    }

    /// Single-point crossover only.
    pub fn single_point() -> Self {
        Self {
            table: StrategyTable {
                entries: vec![(CrossoverStrategy::SinglePoint, 1.0)],
                total_weight: 1.0,
                types: vec![CrossoverStrategy::SinglePoint.tag()],
            },
        }
    }

    /// Uniform crossover only.
    pub fn uniform(probability: f64) -> Result<Self, VariationError> {
        Self::new(vec![(CrossoverStrategy::Uniform { probability }, 1.0)])
    }
}

impl<T: Clone + Send + Sync> Crossover<MultipleValueChromosome<T>> for MultipleValueCrossover {
    fn types(&self) -> &[&'static str] {
        &self.table.types
    }

    fn crossover<R: Rng>(
        &self,
        parent_1: &MultipleValueChromosome<T>,
        parent_2: &MultipleValueChromosome<T>,
        rng: &mut R,
    ) -> Result<CrossoverOutcome<MultipleValueChromosome<T>>, OperatorError> {
        let strategy = self.table.pick(rng);
        if parent_1.len() != parent_2.len() {
            return Err(OperatorError::new(
                strategy.tag(),
                format!(
                    "parents must have equal length, got {} and {}",
                    parent_1.len(),
                    parent_2.len()
                ),
            ));
        }

        let (child_1, child_2) = match strategy {
            CrossoverStrategy::SinglePoint => {
                crossover_single_point(parent_1.values(), parent_2.values(), rng)
            }
            CrossoverStrategy::Uniform { probability } => {
                crossover_uniform(parent_1.values(), parent_2.values(), probability, rng)
            }
        };

        let tag = strategy.tag();
        Ok(CrossoverOutcome {
            children: (
                MultipleValueChromosome::new(child_1),
                MultipleValueChromosome::new(child_2),
            ),
            types: (tag, tag),
        })
    }
}

/// Exchanges tails after a cut drawn from `1..len`.
///
/// With fewer than two genes there is no cut point; the children are copies
/// of their respective parents.
#[instrument(level = "debug", skip(lhs, rhs, rng), fields(genome_length = lhs.len()))]
fn crossover_single_point<T: Clone, R: Rng>(lhs: &[T], rhs: &[T], rng: &mut R) -> (Vec<T>, Vec<T>) {
    let n = lhs.len();
    if n < 2 {
        return (lhs.to_vec(), rhs.to_vec());
    }
    let point = rng.random_range(1..n);

    let mut child_1 = Vec::with_capacity(n);
    child_1.extend_from_slice(&lhs[..point]);
    child_1.extend_from_slice(&rhs[point..]);

    let mut child_2 = Vec::with_capacity(n);
    child_2.extend_from_slice(&rhs[..point]);
    child_2.extend_from_slice(&lhs[point..]);

    (child_1, child_2)
}

/// Picks each gene from either parent; the second child gets the other gene.
#[instrument(level = "debug", skip(lhs, rhs, rng), fields(genome_length = lhs.len()))]
fn crossover_uniform<T: Clone, R: Rng>(
    lhs: &[T],
    rhs: &[T],
    probability: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    lhs.iter()
        .zip(rhs.iter())
        .map(|(a, b)| {
            if rng.random_bool(probability) {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            }
        })
        .unzip()
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation for [`MultipleValueChromosome`].
///
/// New gene values for [`MutationStrategy::Point`] come from the supplied
/// [`ValueGenerator`].
pub struct MultipleValueMutation<T> {
    generator: ValueGenerator<T>,
    table: StrategyTable<MutationStrategy>,
}

impl<T> MultipleValueMutation<T> {
    /// Point mutation only: one gene replaced by a freshly generated value.
    pub fn new(generator: ValueGenerator<T>) -> Self {
        Self {
            generator,
            table: StrategyTable {
                entries: vec![(MutationStrategy::Point, 1.0)],
                total_weight: 1.0,
                types: vec![MutationStrategy::Point.tag()],
            },
        }
    }

    /// Builds a mutation drawing among weighted strategies.
    pub fn with_strategies(
        generator: ValueGenerator<T>,
        strategies: Vec<(MutationStrategy, f64)>,
    ) -> Result<Self, VariationError> {
        let table = StrategyTable::new(strategies, MutationStrategy::tag)?;
        Ok(Self { generator, table })
    }
}

impl<T> std::fmt::Debug for MultipleValueMutation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipleValueMutation")
            .field("strategies", &self.table.entries)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync> Mutation<MultipleValueChromosome<T>> for MultipleValueMutation<T> {
    fn types(&self) -> &[&'static str] {
        &self.table.types
    }

    fn mutate<R: Rng>(
        &self,
        parent: &MultipleValueChromosome<T>,
        rng: &mut R,
    ) -> Result<MutationOutcome<MultipleValueChromosome<T>>, OperatorError> {
        let strategy = self.table.pick(rng);
        if parent.is_empty() {
            return Err(OperatorError::new(
                strategy.tag(),
                "cannot mutate an empty chromosome",
            ));
        }

        let mut values = parent.values().to_vec();
        match strategy {
            MutationStrategy::Point => {
                let idx = rng.random_range(0..values.len());
                let rng: &mut dyn rand::RngCore = rng;
                values[idx] = (self.generator)(rng);
            }
            MutationStrategy::Swap => swap_mutation(&mut values, rng),
            MutationStrategy::Invert => invert_mutation(&mut values, rng),
        }

        Ok(MutationOutcome {
            child: MultipleValueChromosome::new(values),
            mutation_type: strategy.tag(),
        })
    }
}

/// Exchanges two distinct random positions.
fn swap_mutation<T, R: Rng>(values: &mut [T], rng: &mut R) {
    let n = values.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    values.swap(i, j);
}

/// Reverses a random segment (2-opt move).
fn invert_mutation<T, R: Rng>(values: &mut [T], rng: &mut R) {
    let n = values.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    values[start..=end].reverse();
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosomes::Chromosome;
    use crate::random::create_rng;
    use rand::RngCore;
    use std::sync::Arc;

    fn ones_and_zeros(n: usize) -> (MultipleValueChromosome<u8>, MultipleValueChromosome<u8>) {
        (
            MultipleValueChromosome::new(vec![1; n]),
            MultipleValueChromosome::new(vec![0; n]),
        )
    }

    fn counter_generator() -> ValueGenerator<u8> {
        Arc::new(|_rng: &mut dyn RngCore| 7u8)
    }

    // ---- Strategy table ----

    #[test]
    fn test_strategy_table_rejects_bad_input() {
        assert_eq!(
            MultipleValueCrossover::new(vec![]).unwrap_err(),
            VariationError::NoStrategies
        );
        assert_eq!(
            MultipleValueCrossover::new(vec![(CrossoverStrategy::SinglePoint, 0.0)]).unwrap_err(),
            VariationError::InvalidWeight { value: 0.0 }
        );
        assert!(matches!(
            MultipleValueCrossover::uniform(1.5),
            Err(VariationError::InvalidProbability { .. })
        ));
        assert!(MultipleValueMutation::with_strategies(
            counter_generator(),
            vec![(MutationStrategy::Swap, f64::NAN)]
        )
        .is_err());
    }

    #[test]
    fn test_overflowing_total_weight_rejected() {
        let result = MultipleValueMutation::with_strategies(
            counter_generator(),
            vec![(MutationStrategy::Swap, f64::MAX), (MutationStrategy::Invert, f64::MAX)],
        );
        assert!(matches!(
            result,
            Err(VariationError::InvalidWeight { value }) if value.is_infinite()
        ));

        let result = MultipleValueCrossover::new(vec![
            (CrossoverStrategy::SinglePoint, f64::MAX),
            (CrossoverStrategy::Uniform { probability: 0.5 }, f64::MAX),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_large_finite_weights_still_pick() {
        let mutation = MultipleValueMutation::with_strategies(
            counter_generator(),
            vec![(MutationStrategy::Swap, f64::MAX / 4.0), (MutationStrategy::Invert, f64::MAX / 4.0)],
        )
        .unwrap();
        let parent = MultipleValueChromosome::new(vec![1u8, 2, 3]);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let outcome = mutation.mutate(&parent, &mut rng).unwrap();
            assert!(["swap", "invert"].contains(&outcome.mutation_type));
        }
    }

    #[test]
    fn test_strategy_table_weights() {
        let table = StrategyTable::new(
            vec![(MutationStrategy::Swap, 3.0), (MutationStrategy::Invert, 1.0)],
            MutationStrategy::tag,
        )
        .unwrap();
        let mut rng = create_rng(42);
        let swaps = (0..4000)
            .filter(|_| table.pick(&mut rng) == MutationStrategy::Swap)
            .count();
        // Expected 3000
        assert!((2800..3200).contains(&swaps), "got {swaps} swaps");
    }

    #[test]
    fn test_types_deduplicated() {
        let crossover = MultipleValueCrossover::new(vec![
            (CrossoverStrategy::Uniform { probability: 0.3 }, 1.0),
            (CrossoverStrategy::Uniform { probability: 0.7 }, 1.0),
            (CrossoverStrategy::SinglePoint, 1.0),
        ])
        .unwrap();
        assert_eq!(
            Crossover::<MultipleValueChromosome<u8>>::types(&crossover),
            &["uniform", "single_point"]
        );
    }

    // ---- Crossover ----

    #[test]
    fn test_single_point_exchanges_tails() {
        let crossover = MultipleValueCrossover::single_point();
        let (p1, p2) = ones_and_zeros(10);
        let mut rng = create_rng(42);

        for _ in 0..100 {
            let outcome = crossover.crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(outcome.types, ("single_point", "single_point"));

            let (c1, c2) = outcome.children;
            let point = c1.values().iter().position(|&v| v == 0).unwrap();
            assert!((1..10).contains(&point));
            assert!(c1.values()[..point].iter().all(|&v| v == 1));
            assert!(c1.values()[point..].iter().all(|&v| v == 0));
            assert!(c2.values()[..point].iter().all(|&v| v == 0));
            assert!(c2.values()[point..].iter().all(|&v| v == 1));
            assert!(!c1.fit_set() && !c2.fit_set());
        }
    }

    #[test]
    fn test_single_point_single_gene() {
        let crossover = MultipleValueCrossover::single_point();
        let (p1, p2) = ones_and_zeros(1);
        let mut rng = create_rng(1);
        let outcome = crossover.crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(outcome.children.0.values(), &[1]);
        assert_eq!(outcome.children.1.values(), &[0]);
    }

    #[test]
    fn test_uniform_children_are_complementary() {
        let crossover = MultipleValueCrossover::uniform(0.5).unwrap();
        let (p1, p2) = ones_and_zeros(200);
        let mut rng = create_rng(7);

        let outcome = crossover.crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(outcome.types, ("uniform", "uniform"));
        let (c1, c2) = outcome.children;
        for (a, b) in c1.values().iter().zip(c2.values()) {
            assert_eq!(a + b, 1);
        }
        let from_first = c1.values().iter().filter(|&&v| v == 1).count();
        assert!((60..140).contains(&from_first));
    }

    #[test]
    fn test_uniform_extreme_probability_clones() {
        let crossover = MultipleValueCrossover::uniform(1.0).unwrap();
        let (p1, p2) = ones_and_zeros(20);
        let mut rng = create_rng(3);
        let outcome = crossover.crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(outcome.children.0.values(), p1.values());
        assert_eq!(outcome.children.1.values(), p2.values());
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let crossover = MultipleValueCrossover::single_point();
        let p1 = MultipleValueChromosome::new(vec![1u8; 4]);
        let p2 = MultipleValueChromosome::new(vec![0u8; 5]);
        let mut rng = create_rng(42);
        let err = crossover.crossover(&p1, &p2, &mut rng).unwrap_err();
        assert_eq!(err.operator(), "single_point");
    }

    #[test]
    fn test_children_clear_fitness() {
        let crossover = MultipleValueCrossover::uniform(0.5).unwrap();
        let (mut p1, mut p2) = ones_and_zeros(4);
        p1.set_fitness(1.0);
        p2.set_fitness(2.0);
        let mut rng = create_rng(42);
        let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng).unwrap().children;
        assert!(!c1.fit_set());
        assert!(!c2.fit_set());
    }

    // ---- Mutation ----

    #[test]
    fn test_point_mutation_changes_one_gene() {
        let mutation = MultipleValueMutation::new(counter_generator());
        let mut parent = MultipleValueChromosome::new(vec![0u8; 10]);
        parent.set_fitness(3.0);
        let mut rng = create_rng(42);

        let outcome = mutation.mutate(&parent, &mut rng).unwrap();
        assert_eq!(outcome.mutation_type, "point");
        assert_eq!(outcome.child.values().iter().filter(|&&v| v == 7).count(), 1);
        assert!(!outcome.child.fit_set());
        assert_eq!(parent.values(), &[0u8; 10]);
        assert!(parent.fit_set());
    }

    #[test]
    fn test_swap_and_invert_preserve_multiset() {
        let mutation = MultipleValueMutation::with_strategies(
            counter_generator(),
            vec![(MutationStrategy::Swap, 1.0), (MutationStrategy::Invert, 1.0)],
        )
        .unwrap();
        let parent = MultipleValueChromosome::new((0u8..10).collect());
        let mut rng = create_rng(42);
        let mut seen = Vec::new();

        for _ in 0..100 {
            let outcome = mutation.mutate(&parent, &mut rng).unwrap();
            let mut sorted = outcome.child.values().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0u8..10).collect::<Vec<_>>());
            if !seen.contains(&outcome.mutation_type) {
                seen.push(outcome.mutation_type);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, vec!["invert", "swap"]);
    }

    #[test]
    fn test_swap_always_moves_genes() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut values = vec![0, 1];
            swap_mutation(&mut values, &mut rng);
            assert_eq!(values, vec![1, 0]);
        }
    }

    #[test]
    fn test_mutate_empty_chromosome_fails() {
        let mutation = MultipleValueMutation::new(counter_generator());
        let parent = MultipleValueChromosome::<u8>::new(vec![]);
        let mut rng = create_rng(42);
        let err = mutation.mutate(&parent, &mut rng).unwrap_err();
        assert_eq!(err.operator(), "point");
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }
}
