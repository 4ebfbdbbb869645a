//! Self-adaptive constraint handling meta-algorithm
//!
//! Wraps an inner algorithm and drives it through a penalized, unconstrained
//! view of the problem, rescaling the penalty weights from the population's
//! own violation statistics at every iteration.

use crate::algorithm::traits::{Evolver, IntoAlgorithm, NullEvolver};
use crate::algorithm::Algorithm;
use crate::error::{PelagoResult, ValidationError};
use crate::population::Population;
use crate::problem::unconstrain::{Unconstrain, UnconstrainMethod};
use crate::safety::ThreadSafety;

const MIN_MEAN_VIOLATION: f64 = 1e-12;

/// Iterated penalty-based constraint handling
///
/// Each of `iters` iterations builds a weighted-penalty view of the problem,
/// with weights chosen so the mean violation of each constraint is
/// commensurate with the current objective spread, runs the inner algorithm
/// on that view, and re-evaluates the resulting decision vectors against the
/// true constrained problem.
#[derive(Clone, Debug)]
pub struct CstrsSelfAdaptive {
    inner: Algorithm,
    iters: usize,
}

impl CstrsSelfAdaptive {
    /// Wrap an algorithm (or raw evolver)
    ///
    /// Fails with [`ValidationError`] if `iters` is zero.
    pub fn new(algo: impl IntoAlgorithm, iters: usize) -> PelagoResult<Self> {
        if iters == 0 {
            return Err(ValidationError::OutOfRange {
                name: "iters",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self {
            inner: algo.into_algorithm(),
            iters,
        })
    }

    /// The wrapped algorithm
    pub fn inner(&self) -> &Algorithm {
        &self.inner
    }

    /// Penalty weights derived from the current population
    fn adaptive_weights(pop: &Population) -> Vec<f64> {
        let prob = pop.problem();
        let nobj = prob.num_objectives();
        let nec = prob.num_eq_constraints();
        let nc = prob.num_constraints();

        let objectives: Vec<f64> = pop.iter().map(|ind| ind.f[0]).collect();
        let spread = objectives
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
            - objectives.iter().cloned().fold(f64::INFINITY, f64::min);
        let scale = if spread > 0.0 { spread } else { 1.0 };

        (0..nc)
            .map(|j| {
                let mean = pop
                    .iter()
                    .map(|ind| {
                        let v = ind.f[nobj + j];
                        if j < nec {
                            v.abs()
                        } else {
                            v.max(0.0)
                        }
                    })
                    .sum::<f64>()
                    / pop.len() as f64;
                scale / mean.max(MIN_MEAN_VIOLATION)
            })
            .collect()
    }

    /// Weighted-penalty fitness computed from a raw constrained fitness vector
    fn penalized_f(f: &[f64], weights: &[f64], nobj: usize, nec: usize) -> f64 {
        let penalty: f64 = f[nobj..]
            .iter()
            .enumerate()
            .map(|(j, &v)| {
                let viol = if j < nec { v.abs() } else { v.max(0.0) };
                viol * weights[j]
            })
            .sum();
        f[0] + penalty
    }
}

impl Default for CstrsSelfAdaptive {
    fn default() -> Self {
        Self {
            inner: NullEvolver.into_algorithm(),
            iters: 1,
        }
    }
}

impl Evolver for CstrsSelfAdaptive {
    fn evolve(&self, pop: Population) -> PelagoResult<Population> {
        let prob = pop.problem().clone();
        if prob.num_constraints() == 0 {
            return Err(ValidationError::IncompatibleInner(
                "self-adaptive constraint handling requires a constrained problem"
                    .to_string(),
            )
            .into());
        }
        if prob.num_objectives() != 1 {
            return Err(ValidationError::IncompatibleInner(
                "self-adaptive constraint handling requires a single-objective problem"
                    .to_string(),
            )
            .into());
        }
        if pop.is_empty() {
            return Ok(pop);
        }

        let nobj = prob.num_objectives();
        let nec = prob.num_eq_constraints();
        let seed = pop.seed();
        let mut current = pop;
        for _ in 0..self.iters {
            let weights = Self::adaptive_weights(&current);
            let penalized =
                Unconstrain::new(prob.clone(), UnconstrainMethod::Weighted, weights.clone())?;
            let mut view = Population::new(penalized, 0, Some(seed))?;
            for ind in current.iter() {
                let pf = Self::penalized_f(&ind.f, &weights, nobj, nec);
                view.push_back_xf(ind.x.clone(), vec![pf])?;
            }

            let evolved = self.inner.evolve(view)?;

            let mut next = Population::new(prob.clone(), 0, Some(seed))?;
            for ind in evolved.iter() {
                next.push_back(ind.x.clone())?;
            }
            current = next;
        }
        Ok(current)
    }

    fn thread_safety(&self) -> ThreadSafety {
        self.inner.thread_safety()
    }

    fn name(&self) -> String {
        format!("self-adaptive constraint handling [{}]", self.inner.name())
    }

    fn clone_evolver(&self) -> Box<dyn Evolver> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::random_search::RandomSearch;
    use crate::error::PelagoError;
    use crate::problem::benchmarks::{HockSchittkowsky71, Sphere};

    #[test]
    fn test_cstrs_rejects_zero_iters() {
        let err = CstrsSelfAdaptive::new(NullEvolver, 0).unwrap_err();
        assert!(matches!(err, PelagoError::Validation(_)));
    }

    #[test]
    fn test_cstrs_rejects_unconstrained_problem() {
        let algo = CstrsSelfAdaptive::new(RandomSearch::new(5), 2).unwrap();
        let pop = Population::new(Sphere::new(2), 5, Some(1)).unwrap();
        let err = algo.evolve(pop).unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Validation(ValidationError::IncompatibleInner(_))
        ));
    }

    #[test]
    fn test_cstrs_preserves_population_shape() {
        let algo = CstrsSelfAdaptive::new(RandomSearch::new(10), 2).unwrap();
        let pop = Population::new(HockSchittkowsky71::new(), 12, Some(32)).unwrap();
        let after = algo.evolve(pop).unwrap();
        assert_eq!(after.len(), 12);
        assert_eq!(after.problem().num_constraints(), 2);
        for ind in after.iter() {
            assert_eq!(ind.f.len(), 3);
        }
    }

    #[test]
    fn test_cstrs_default_wraps_null() {
        let algo = CstrsSelfAdaptive::default();
        assert_eq!(algo.inner().name(), "null algorithm");
    }
}
