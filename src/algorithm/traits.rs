//! Algorithm plugin trait
//!
//! This module defines the capability interface implemented by user-supplied
//! optimization algorithms, plus the canonical null algorithm.

use crate::error::PelagoResult;
use crate::population::Population;
use crate::safety::ThreadSafety;

/// A user-supplied single-step evolution function
///
/// One call to [`Evolver::evolve`] advances a population by one step of
/// whatever metaheuristic the plugin implements. The orchestration layer
/// treats the step as atomic and uninterruptible; it never runs two steps of
/// the same island concurrently.
pub trait Evolver: Send + 'static {
    /// Evolve a population by one step
    fn evolve(&self, pop: Population) -> PelagoResult<Population>;

    /// Declared thread safety level
    ///
    /// Defaults to the least-safe level; override to opt into the shared
    /// execution backend.
    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::None
    }

    /// Human-readable algorithm name
    fn name(&self) -> String {
        "unnamed algorithm".to_string()
    }

    /// Deep copy of this evolver
    fn clone_evolver(&self) -> Box<dyn Evolver>;
}

/// Conversion into an [`Algorithm`](crate::algorithm::Algorithm) wrapper
///
/// Implemented for every [`Evolver`] (auto-wrapping) and for `Algorithm`
/// itself (identity), so meta-wrappers and builders accept either form.
pub trait IntoAlgorithm {
    /// Wrap `self` into an `Algorithm`
    fn into_algorithm(self) -> crate::algorithm::Algorithm;
}

impl IntoAlgorithm for crate::algorithm::Algorithm {
    fn into_algorithm(self) -> crate::algorithm::Algorithm {
        self
    }
}

impl<E: Evolver> IntoAlgorithm for E {
    fn into_algorithm(self) -> crate::algorithm::Algorithm {
        crate::algorithm::Algorithm::new(self)
    }
}

/// Canonical do-nothing algorithm
///
/// Returns the population unchanged. Used as the default inner algorithm of
/// meta-algorithms.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEvolver;

impl Evolver for NullEvolver {
    fn evolve(&self, pop: Population) -> PelagoResult<Population> {
        Ok(pop)
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "null algorithm".to_string()
    }

    fn clone_evolver(&self) -> Box<dyn Evolver> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::benchmarks::Sphere;

    #[test]
    fn test_null_evolver_is_identity() {
        let pop = Population::new(Sphere::new(2), 5, Some(3)).unwrap();
        let before = pop.get_x();
        let after = NullEvolver.evolve(pop).unwrap();
        assert_eq!(after.get_x(), before);
    }
}
