//! Per-call provenance of offspring.
//!
//! [`VariationDiagnostics`] exposes three index-aligned sequences: the parent
//! indices of each offspring, the crossover tag used (if any), and the
//! mutation tag used (if any). Entries are only ever appended together from a
//! single [`Provenance`], so the sequences cannot drift apart.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Operation class that produced an offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Operation {
    Crossover,
    Mutation,
    Replication,
}

/// Population indices of the parent(s) of one offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ParentIndices {
    /// Mutation or replication.
    Single(usize),
    /// Crossover, in the order the parents were passed to the operator.
    Pair(usize, usize),
}

impl ParentIndices {
    /// Number of parents: 1 or 2.
    pub fn len(&self) -> usize {
        match self {
            ParentIndices::Single(_) => 1,
            ParentIndices::Pair(..) => 2,
        }
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_vec(&self) -> Vec<usize> {
        match *self {
            ParentIndices::Single(i) => vec![i],
            ParentIndices::Pair(i, j) => vec![i, j],
        }
    }

    /// Largest parent index.
    pub fn max(&self) -> usize {
        match *self {
            ParentIndices::Single(i) => i,
            ParentIndices::Pair(i, j) => i.max(j),
        }
    }
}

/// How a single offspring was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Provenance {
    Crossover {
        parents: (usize, usize),
        crossover_type: &'static str,
    },
    Mutation {
        parent: usize,
        mutation_type: &'static str,
    },
    Replication {
        parent: usize,
    },
}

impl Provenance {
    pub fn operation(&self) -> Operation {
        match self {
            Provenance::Crossover { .. } => Operation::Crossover,
            Provenance::Mutation { .. } => Operation::Mutation,
            Provenance::Replication { .. } => Operation::Replication,
        }
    }
}

/// Offspring count per operation class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OperationCounts {
    pub crossover: usize,
    pub mutation: usize,
    pub replication: usize,
}

impl OperationCounts {
    pub fn total(&self) -> usize {
        self.crossover + self.mutation + self.replication
    }
}

/// Provenance of every offspring from the most recent variation call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VariationDiagnostics {
    offspring_parents: Vec<ParentIndices>,
    crossover_offspring_type: Vec<Option<&'static str>>,
    mutation_offspring_type: Vec<Option<&'static str>>,
}

impl VariationDiagnostics {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offspring_parents: Vec::with_capacity(capacity),
            crossover_offspring_type: Vec::with_capacity(capacity),
            mutation_offspring_type: Vec::with_capacity(capacity),
        }
    }

    /// Appends the record of the next offspring.
    pub fn push(&mut self, provenance: Provenance) {
        let (parents, crossover_type, mutation_type) = match provenance {
            Provenance::Crossover {
                parents: (i, j),
                crossover_type,
            } => (ParentIndices::Pair(i, j), Some(crossover_type), None),
            Provenance::Mutation {
                parent,
                mutation_type,
            } => (ParentIndices::Single(parent), None, Some(mutation_type)),
            Provenance::Replication { parent } => (ParentIndices::Single(parent), None, None),
        };
        self.offspring_parents.push(parents);
        self.crossover_offspring_type.push(crossover_type);
        self.mutation_offspring_type.push(mutation_type);
    }

    /// Parent indices of each offspring.
    pub fn offspring_parents(&self) -> &[ParentIndices] {
        &self.offspring_parents
    }

    /// Crossover tag of each offspring, `None` where crossover was not used.
    pub fn crossover_offspring_type(&self) -> &[Option<&'static str>] {
        &self.crossover_offspring_type
    }

    /// Mutation tag of each offspring, `None` where mutation was not used.
    pub fn mutation_offspring_type(&self) -> &[Option<&'static str>] {
        &self.mutation_offspring_type
    }

    pub fn len(&self) -> usize {
        self.offspring_parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offspring_parents.is_empty()
    }

    /// Operation class of offspring `index`, or `None` if out of range.
    pub fn operation(&self, index: usize) -> Option<Operation> {
        let cx = self.crossover_offspring_type.get(index)?;
        let mt = self.mutation_offspring_type.get(index)?;
        Some(match (cx, mt) {
            (Some(_), _) => Operation::Crossover,
            (None, Some(_)) => Operation::Mutation,
            (None, None) => Operation::Replication,
        })
    }

    /// Tallies offspring by operation class.
    pub fn counts(&self) -> OperationCounts {
        let mut counts = OperationCounts::default();
        for op in (0..self.len()).filter_map(|i| self.operation(i)) {
            match op {
                Operation::Crossover => counts.crossover += 1,
                Operation::Mutation => counts.mutation += 1,
                Operation::Replication => counts.replication += 1,
            }
        }
        counts
    }

    pub(crate) fn clear(&mut self) {
        self.offspring_parents.clear();
        self.crossover_offspring_type.clear();
        self.mutation_offspring_type.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VariationDiagnostics {
        let mut diag = VariationDiagnostics::with_capacity(3);
        diag.push(Provenance::Crossover {
            parents: (0, 3),
            crossover_type: "single_point",
        });
        diag.push(Provenance::Mutation {
            parent: 2,
            mutation_type: "swap",
        });
        diag.push(Provenance::Replication { parent: 1 });
        diag
    }

    #[test]
    fn test_push_keeps_sequences_aligned() {
        let diag = sample();
        assert_eq!(diag.len(), 3);
        assert_eq!(diag.offspring_parents().len(), 3);
        assert_eq!(diag.crossover_offspring_type().len(), 3);
        assert_eq!(diag.mutation_offspring_type().len(), 3);

        assert_eq!(diag.offspring_parents()[0], ParentIndices::Pair(0, 3));
        assert_eq!(diag.crossover_offspring_type()[0], Some("single_point"));
        assert_eq!(diag.mutation_offspring_type()[0], None);

        assert_eq!(diag.offspring_parents()[1], ParentIndices::Single(2));
        assert_eq!(diag.crossover_offspring_type()[1], None);
        assert_eq!(diag.mutation_offspring_type()[1], Some("swap"));

        assert_eq!(diag.offspring_parents()[2], ParentIndices::Single(1));
        assert_eq!(diag.crossover_offspring_type()[2], None);
        assert_eq!(diag.mutation_offspring_type()[2], None);
    }

    #[test]
    fn test_operation_and_counts() {
        let diag = sample();
        assert_eq!(diag.operation(0), Some(Operation::Crossover));
        assert_eq!(diag.operation(1), Some(Operation::Mutation));
        assert_eq!(diag.operation(2), Some(Operation::Replication));
        assert_eq!(diag.operation(3), None);

        let counts = diag.counts();
        assert_eq!(
            counts,
            OperationCounts {
                crossover: 1,
                mutation: 1,
                replication: 1
            }
        );
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_parent_indices() {
        assert_eq!(ParentIndices::Single(4).len(), 1);
        assert_eq!(ParentIndices::Pair(1, 4).len(), 2);
        assert_eq!(ParentIndices::Pair(1, 4).as_vec(), vec![1, 4]);
        assert_eq!(ParentIndices::Pair(5, 2).max(), 5);
        assert!(!ParentIndices::Single(0).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut diag = sample();
        diag.clear();
        assert!(diag.is_empty());
        assert_eq!(diag.counts().total(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_diagnostic_types_serialize() {
        fn assert_serialize<T: Serialize>(_: &T) {}

        let diag = sample();
        assert_serialize(&diag);
        assert_serialize(&diag.counts());
        assert_serialize(&Provenance::Replication { parent: 1 });
        assert_serialize(&Operation::Mutation);
    }
}
