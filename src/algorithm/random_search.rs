//! Elitist random search
//!
//! A minimal stochastic algorithm used in tests and as a sensible default
//! for quick experiments: each step draws random decision vectors within the
//! problem bounds and keeps them only if they beat the current worst
//! individual.

use std::cmp::Ordering;

use crate::algorithm::traits::Evolver;
use crate::error::PelagoResult;
use crate::population::{compare_fc, Population};
use crate::safety::ThreadSafety;

/// Elitist uniform random search
///
/// Single-objective, constraint-aware via feasibility-first comparison.
/// Draws from the population's own generator, so seeded populations evolve
/// deterministically.
#[derive(Clone, Copy, Debug)]
pub struct RandomSearch {
    iters: usize,
}

impl RandomSearch {
    /// Create a random search performing `iters` draws per step
    pub fn new(iters: usize) -> Self {
        assert!(iters >= 1, "RandomSearch requires at least 1 iteration");
        Self { iters }
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Evolver for RandomSearch {
    fn evolve(&self, mut pop: Population) -> PelagoResult<Population> {
        if pop.is_empty() {
            return Ok(pop);
        }
        let nec = pop.problem().num_eq_constraints();
        let nic = pop.problem().num_ineq_constraints();
        for _ in 0..self.iters {
            let x = pop.random_decision_vector();
            let f = pop.problem().fitness(&x)?;
            let worst = pop.worst_idx()?;
            let worst_f = &pop.get(worst).expect("index from worst_idx").f;
            if compare_fc(&f, worst_f, nec, nic) == Ordering::Less {
                pop.set_xf(worst, x, f)?;
            }
        }
        Ok(pop)
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "random search".to_string()
    }

    fn clone_evolver(&self) -> Box<dyn Evolver> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::benchmarks::{HockSchittkowsky71, Sphere};

    #[test]
    fn test_random_search_never_worsens_champion() {
        let pop = Population::new(Sphere::new(3), 10, Some(42)).unwrap();
        let before = pop.champion_f().unwrap();
        let after = RandomSearch::new(50).evolve(pop).unwrap();
        assert!(after.champion_f().unwrap()[0] <= before[0]);
    }

    #[test]
    fn test_random_search_is_deterministic_per_seed() {
        let a = RandomSearch::new(20)
            .evolve(Population::new(Sphere::new(2), 5, Some(7)).unwrap())
            .unwrap();
        let b = RandomSearch::new(20)
            .evolve(Population::new(Sphere::new(2), 5, Some(7)).unwrap())
            .unwrap();
        assert_eq!(a.get_x(), b.get_x());
    }

    #[test]
    fn test_random_search_keeps_population_size() {
        let pop = Population::new(HockSchittkowsky71::new(), 8, Some(1)).unwrap();
        let after = RandomSearch::new(30).evolve(pop).unwrap();
        assert_eq!(after.len(), 8);
    }

    #[test]
    fn test_random_search_empty_population() {
        let pop = Population::new(Sphere::new(2), 0, Some(1)).unwrap();
        let after = RandomSearch::new(5).evolve(pop).unwrap();
        assert!(after.is_empty());
    }
}
