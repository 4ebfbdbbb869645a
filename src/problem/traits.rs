//! Problem plugin trait
//!
//! This module defines the capability interface implemented by user-supplied
//! objective evaluators.

use crate::error::{EvaluationError, PelagoResult};
use crate::safety::ThreadSafety;

/// A user-supplied objective evaluator
///
/// Implementors describe a box-bounded optimization problem: a fitness
/// function returning `num_objectives + num_eq_constraints +
/// num_ineq_constraints` values, in that order. Equality constraints are
/// satisfied at zero, inequality constraints when non-positive.
///
/// The evaluator is treated as an opaque plugin: the orchestration layer
/// never inspects the fitness values beyond champion ordering, and never
/// shares one instance between islands. [`Evaluator::clone_evaluator`] must
/// produce a fully independent deep copy.
pub trait Evaluator: Send + 'static {
    /// Evaluate the fitness of a decision vector
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError>;

    /// Box bounds of the decision space, as (lower, upper) vectors
    ///
    /// The problem dimension is the length of these vectors.
    fn bounds(&self) -> (Vec<f64>, Vec<f64>);

    /// Number of objectives
    fn num_objectives(&self) -> usize {
        1
    }

    /// Number of equality constraints
    fn num_eq_constraints(&self) -> usize {
        0
    }

    /// Number of inequality constraints
    fn num_ineq_constraints(&self) -> usize {
        0
    }

    /// Declared thread safety level
    ///
    /// Defaults to the least-safe level; override to opt into the shared
    /// execution backend.
    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::None
    }

    /// Human-readable problem name
    fn name(&self) -> String {
        "unnamed problem".to_string()
    }

    /// Deep copy of this evaluator
    fn clone_evaluator(&self) -> Box<dyn Evaluator>;
}

/// Conversion into a [`Problem`](crate::problem::Problem) wrapper
///
/// Implemented for every [`Evaluator`] (auto-wrapping) and for `Problem`
/// itself (identity), so meta-wrappers and builders accept either form.
pub trait IntoProblem {
    /// Wrap `self` into a validated `Problem`
    fn into_problem(self) -> PelagoResult<crate::problem::Problem>;
}

impl IntoProblem for crate::problem::Problem {
    fn into_problem(self) -> PelagoResult<crate::problem::Problem> {
        Ok(self)
    }
}

impl<E: Evaluator> IntoProblem for E {
    fn into_problem(self) -> PelagoResult<crate::problem::Problem> {
        crate::problem::Problem::new(self)
    }
}
