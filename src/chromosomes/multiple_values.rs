//! Fixed-length chromosomes of arbitrary values.
//!
//! [`MultipleValueChromosome`] stores a vector of genes (bits, floats,
//! symbols, ...) plus an optional fitness. Random genes come from a
//! [`ValueGenerator`], a shared closure that draws one value per call.

use super::types::Chromosome;
use rand::{Rng, RngCore};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Draws one random gene value.
///
/// Shared between threads, so the closure must be `Send + Sync`.
///
/// ```
/// use rand::{Rng, RngCore};
/// use std::sync::Arc;
/// use u_variation::chromosomes::ValueGenerator;
///
/// let gen: ValueGenerator<f64> = Arc::new(|rng: &mut dyn RngCore| rng.random_range(-1.0..1.0));
/// ```
pub type ValueGenerator<T> = Arc<dyn Fn(&mut dyn RngCore) -> T + Send + Sync>;

/// A chromosome made of a fixed-length list of values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultipleValueChromosome<T> {
    values: Vec<T>,
    fitness: Option<f64>,
}

impl<T> MultipleValueChromosome<T> {
    /// Wraps `values` in an unevaluated chromosome.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            fitness: None,
        }
    }

    /// Creates an unevaluated chromosome of `len` generated values.
    pub fn random<R: Rng>(len: usize, generator: &ValueGenerator<T>, rng: &mut R) -> Self {
        let rng: &mut dyn RngCore = rng;
        let values = (0..len).map(|_| generator(&mut *rng)).collect();
        Self::new(values)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mutable access to the genes. Clears the fitness.
    pub fn values_mut(&mut self) -> &mut Vec<T> {
        self.fitness = None;
        &mut self.values
    }
}

impl<T: Clone + Send + Sync> Chromosome for MultipleValueChromosome<T> {
    type Fitness = f64;

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    fn clear_fitness(&mut self) {
        self.fitness = None;
    }
}
