//! Monotonic basin hopping meta-algorithm
//!
//! Wraps an inner algorithm and restarts it from randomly perturbed copies
//! of the population until a configurable number of consecutive runs brings
//! no improvement.

use std::cmp::Ordering;

use rand::Rng;

use crate::algorithm::traits::{Evolver, IntoAlgorithm, NullEvolver};
use crate::algorithm::Algorithm;
use crate::error::{PelagoResult, ValidationError};
use crate::population::{compare_fc, Population};
use crate::safety::ThreadSafety;

/// Monotonic basin hopping around an inner algorithm
///
/// Each round perturbs every individual inside a box whose width per
/// dimension is `perturb[i]` times the bound range, runs the inner algorithm
/// on the perturbed population, and accepts the result only if its champion
/// improves. `stop` consecutive non-improving rounds end the step.
#[derive(Clone, Debug)]
pub struct Mbh {
    inner: Algorithm,
    stop: usize,
    perturb: Vec<f64>,
}

impl Mbh {
    /// Wrap an algorithm (or raw evolver) with a perturbation vector
    ///
    /// `perturb` is either one entry, applied to every dimension, or one
    /// entry per problem dimension. Fails with [`ValidationError`] if `stop`
    /// is zero or any perturbation lies outside `(0, 1]`.
    pub fn new(
        algo: impl IntoAlgorithm,
        stop: usize,
        perturb: Vec<f64>,
    ) -> PelagoResult<Self> {
        if stop == 0 {
            return Err(ValidationError::OutOfRange {
                name: "stop",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if perturb.is_empty() {
            return Err(ValidationError::OutOfRange {
                name: "perturb",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if perturb.iter().any(|&p| !(p > 0.0 && p <= 1.0)) {
            return Err(ValidationError::OutOfRange {
                name: "perturb",
                reason: "every component must lie in (0, 1]".to_string(),
            }
            .into());
        }
        Ok(Self {
            inner: algo.into_algorithm(),
            stop,
            perturb,
        })
    }

    /// Convenience constructor with one perturbation for every dimension
    pub fn uniform(algo: impl IntoAlgorithm, stop: usize, perturb: f64) -> PelagoResult<Self> {
        Self::new(algo, stop, vec![perturb])
    }

    /// The wrapped algorithm
    pub fn inner(&self) -> &Algorithm {
        &self.inner
    }

    fn perturbed(&self, pop: &Population, widths: &[f64]) -> PelagoResult<Population> {
        let (lb, ub) = pop.problem().bounds();
        let (lb, ub) = (lb.to_vec(), ub.to_vec());
        let mut trial = pop.clone();
        for idx in 0..trial.len() {
            let base = trial.get(idx).expect("index within len").x.clone();
            let x: Vec<f64> = base
                .iter()
                .enumerate()
                .map(|(i, &xi)| {
                    let offset = trial.rng_mut().gen_range(-1.0..=1.0) * widths[i];
                    (xi + offset).clamp(lb[i], ub[i])
                })
                .collect();
            trial.set_x(idx, x)?;
        }
        Ok(trial)
    }
}

impl Default for Mbh {
    fn default() -> Self {
        Self {
            inner: NullEvolver.into_algorithm(),
            stop: 5,
            perturb: vec![1e-2],
        }
    }
}

impl Evolver for Mbh {
    fn evolve(&self, pop: Population) -> PelagoResult<Population> {
        if pop.is_empty() {
            return Ok(pop);
        }
        let dim = pop.problem().dimension();
        let widths: Vec<f64> = if self.perturb.len() == 1 {
            let (lb, ub) = pop.problem().bounds();
            lb.iter()
                .zip(ub)
                .map(|(&l, &u)| self.perturb[0] * (u - l))
                .collect()
        } else {
            if self.perturb.len() != dim {
                return Err(ValidationError::LengthMismatch {
                    name: "perturb",
                    expected: dim,
                    actual: self.perturb.len(),
                }
                .into());
            }
            let (lb, ub) = pop.problem().bounds();
            lb.iter()
                .zip(ub)
                .zip(&self.perturb)
                .map(|((&l, &u), &p)| p * (u - l))
                .collect()
        };
        let nec = pop.problem().num_eq_constraints();
        let nic = pop.problem().num_ineq_constraints();

        let mut current = pop;
        let mut best_f = current.champion_f()?;
        let mut stagnant = 0;
        while stagnant < self.stop {
            let trial = self.perturbed(&current, &widths)?;
            let evolved = self.inner.evolve(trial)?;
            let trial_f = evolved.champion_f()?;
            if compare_fc(&trial_f, &best_f, nec, nic) == Ordering::Less {
                best_f = trial_f;
                current = evolved;
                stagnant = 0;
            } else {
                stagnant += 1;
            }
        }
        Ok(current)
    }

    fn thread_safety(&self) -> ThreadSafety {
        self.inner.thread_safety()
    }

    fn name(&self) -> String {
        format!("monotonic basin hopping [{}]", self.inner.name())
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
    use crate::problem::benchmarks::Sphere;

    #[test]
    fn test_mbh_rejects_bad_parameters() {
        let err = Mbh::uniform(NullEvolver, 0, 0.1).unwrap_err();
        assert!(matches!(err, PelagoError::Validation(_)));

        let err = Mbh::uniform(NullEvolver, 5, 0.0).unwrap_err();
        assert!(matches!(err, PelagoError::Validation(_)));

        let err = Mbh::uniform(NullEvolver, 5, 1.5).unwrap_err();
        assert!(matches!(err, PelagoError::Validation(_)));
    }

    #[test]
    fn test_mbh_rejects_mismatched_perturb_at_evolve() {
        let mbh = Mbh::new(NullEvolver, 2, vec![0.1, 0.1, 0.1]).unwrap();
        let pop = Population::new(Sphere::new(2), 4, Some(1)).unwrap();
        let err = mbh.evolve(pop).unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Validation(ValidationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_mbh_never_worsens_champion() {
        let mbh = Mbh::uniform(RandomSearch::new(10), 3, 0.05).unwrap();
        let pop = Population::new(Sphere::new(2), 10, Some(42)).unwrap();
        let before = pop.champion_f().unwrap();
        let after = mbh.evolve(pop).unwrap();
        assert!(after.champion_f().unwrap()[0] <= before[0]);
    }

    #[test]
    fn test_mbh_default_wraps_null() {
        let mbh = Mbh::default();
        assert_eq!(mbh.inner().name(), "null algorithm");
    }

    #[test]
    fn test_mbh_accepts_wrapped_algorithm() {
        let algo = Algorithm::new(RandomSearch::new(5));
        let mbh = Mbh::uniform(algo, 2, 0.1).unwrap();
        assert!(mbh.name().contains("random search"));
    }
}
