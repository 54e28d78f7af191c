//! The chromosome capability required by the variation operators.

/// A candidate solution (e.g. an equation) that carries its own fitness.
///
/// The variation layer treats chromosomes as opaque values. It only needs
/// to copy them and, through the operators, to mark freshly produced
/// children as unevaluated.
///
/// # Fitness state
///
/// Fitness is `None` until an evaluator calls
/// [`set_fitness`](Chromosome::set_fitness). Children produced by crossover
/// or mutation are expected to come back with cleared fitness. Replicated
/// children keep the parent's fitness, so evaluators that skip already-set
/// individuals will not re-evaluate them.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Equation {
///     stack: Vec<Node>,
///     fitness: Option<f64>,
/// }
///
/// impl Chromosome for Equation {
///     type Fitness = f64;
///     fn fitness(&self) -> Option<f64> { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = Some(f); }
///     fn clear_fitness(&mut self) { self.fitness = None; }
/// }
/// ```
pub trait Chromosome: Clone + Send + Sync {
    /// The fitness type assigned by the evaluator.
    type Fitness: Copy + PartialOrd + Send + Sync + std::fmt::Debug;

    /// Returns the current fitness, or `None` if not evaluated.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Stores an evaluated fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Marks the fitness as stale.
    fn clear_fitness(&mut self);

    /// Whether a fitness has been assigned.
    fn fit_set(&self) -> bool {
        self.fitness().is_some()
    }

    /// Produces an independent copy with the same fitness state.
    ///
    /// The copy must share no mutable backing with `self`. The default
    /// implementation relies on [`Clone`], which is sufficient for any
    /// chromosome that owns its data.
    fn copy(&self) -> Self {
        self.clone()
    }
}
