//! Errors raised while configuring or running variation.

/// Failure reported by a crossover or mutation operator.
///
/// Operators are deterministic given their random state, so a failure
/// signals a bug or a malformed input rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operator} failed: {reason}")]
pub struct OperatorError {
    operator: &'static str,
    reason: String,
}

impl OperatorError {
    pub fn new(operator: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operator,
            reason: reason.into(),
        }
    }

    /// Name of the operator that failed.
    pub fn operator(&self) -> &'static str {
        self.operator
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors produced while building operators, configuring [`VarOr`](super::VarOr),
/// or generating offspring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VariationError {
    /// A probability was NaN or outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got: {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// A strategy weight was not finite and positive.
    #[error("strategy weight must be finite and positive, got: {value}")]
    InvalidWeight { value: f64 },

    /// An operator was built without any strategy.
    #[error("operator needs at least one strategy")]
    NoStrategies,

    /// Parent sampling needed more individuals than the population holds.
    #[error("cannot sample {required} distinct parent(s) from a population of {actual}")]
    PopulationTooSmall { required: usize, actual: usize },

    /// A genetic operator failed; propagated unchanged.
    #[error(transparent)]
    Operator(#[from] OperatorError),
}

/// Checks that `value` is a finite probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64, VariationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(VariationError::InvalidProbability { name, value });
    }
    Ok(value)
}
