//! Algorithm value wrapper
//!
//! This module provides the [`Algorithm`] type, an immutable value wrapper
//! around a user-supplied [`Evolver`].

use std::fmt;

use crate::algorithm::traits::Evolver;
use crate::error::PelagoResult;
use crate::population::Population;
use crate::safety::ThreadSafety;

/// Immutable value wrapper around an evolution step function
///
/// Construction takes ownership of the plugin, so the wrapper is the sole
/// owner of an isolated instance. The declared thread safety is cached at
/// construction and consulted once, when an island binds to a backend.
pub struct Algorithm {
    inner: Box<dyn Evolver>,
    safety: ThreadSafety,
}

impl Algorithm {
    /// Wrap an evolver
    pub fn new(evolver: impl Evolver) -> Self {
        let inner: Box<dyn Evolver> = Box::new(evolver);
        let safety = inner.thread_safety();
        Self { inner, safety }
    }

    /// Evolve a population by one step
    pub fn evolve(&self, pop: Population) -> PelagoResult<Population> {
        self.inner.evolve(pop)
    }

    /// Declared thread safety level, cached at construction
    pub fn thread_safety(&self) -> ThreadSafety {
        self.safety
    }

    /// Algorithm name
    pub fn name(&self) -> String {
        self.inner.name()
    }
}

impl Clone for Algorithm {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_evolver(),
            safety: self.safety,
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.name())
            .field("thread_safety", &self.safety)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::NullEvolver;
    use crate::problem::benchmarks::Sphere;

    #[test]
    fn test_algorithm_wraps_and_delegates() {
        let algo = Algorithm::new(NullEvolver);
        assert_eq!(algo.thread_safety(), ThreadSafety::Basic);
        assert_eq!(algo.name(), "null algorithm");

        let pop = Population::new(Sphere::new(2), 3, Some(5)).unwrap();
        let before = pop.get_x();
        let after = algo.evolve(pop).unwrap();
        assert_eq!(after.get_x(), before);
    }

    #[test]
    fn test_algorithm_clone_is_independent() {
        let algo = Algorithm::new(NullEvolver);
        let copy = algo.clone();
        assert_eq!(copy.name(), algo.name());
        assert_eq!(copy.thread_safety(), algo.thread_safety());
    }
}
