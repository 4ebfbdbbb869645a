//! Problem value wrapper
//!
//! This module provides the [`Problem`] type, an immutable value wrapper
//! around a user-supplied [`Evaluator`].

use std::fmt;

use crate::error::{ConstructionError, EvaluationError, PelagoResult};
use crate::problem::traits::Evaluator;
use crate::safety::ThreadSafety;

/// Immutable value wrapper around an objective evaluator
///
/// Construction takes ownership of the plugin, so the wrapper is the sole
/// owner of an isolated instance; no caller-held alias can reach it.
/// Introspection (dimension, objective and constraint counts, bounds,
/// declared thread safety) runs once at construction and is cached.
pub struct Problem {
    inner: Box<dyn Evaluator>,
    lb: Vec<f64>,
    ub: Vec<f64>,
    nobj: usize,
    nec: usize,
    nic: usize,
    safety: ThreadSafety,
}

impl Problem {
    /// Wrap an evaluator, validating its introspection data
    pub fn new(evaluator: impl Evaluator) -> PelagoResult<Self> {
        Self::from_boxed(Box::new(evaluator))
    }

    fn from_boxed(inner: Box<dyn Evaluator>) -> PelagoResult<Self> {
        let (lb, ub) = inner.bounds();
        if lb.is_empty() {
            return Err(ConstructionError::Introspection(
                "problem dimension is zero".to_string(),
            )
            .into());
        }
        if lb.len() != ub.len() {
            return Err(ConstructionError::Introspection(format!(
                "bound lengths differ: {} lower vs {} upper",
                lb.len(),
                ub.len()
            ))
            .into());
        }
        for (i, (&l, &u)) in lb.iter().zip(&ub).enumerate() {
            if !l.is_finite() || !u.is_finite() {
                return Err(ConstructionError::Introspection(format!(
                    "non-finite bound in dimension {i}"
                ))
                .into());
            }
            if l > u {
                return Err(ConstructionError::Introspection(format!(
                    "inverted bounds in dimension {i}: {l} > {u}"
                ))
                .into());
            }
        }
        let nobj = inner.num_objectives();
        if nobj == 0 {
            return Err(ConstructionError::Introspection(
                "problem reports zero objectives".to_string(),
            )
            .into());
        }
        let nec = inner.num_eq_constraints();
        let nic = inner.num_ineq_constraints();
        let safety = inner.thread_safety();
        Ok(Self {
            inner,
            lb,
            ub,
            nobj,
            nec,
            nic,
            safety,
        })
    }

    /// Evaluate the fitness of a decision vector
    ///
    /// Checks the decision vector length on the way in and the fitness
    /// vector length on the way out.
    pub fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        if x.len() != self.dimension() {
            return Err(EvaluationError::DecisionLength {
                expected: self.dimension(),
                actual: x.len(),
            });
        }
        let f = self.inner.fitness(x)?;
        if f.len() != self.fitness_dimension() {
            return Err(EvaluationError::FitnessLength {
                expected: self.fitness_dimension(),
                actual: f.len(),
            });
        }
        Ok(f)
    }

    /// Problem dimension
    pub fn dimension(&self) -> usize {
        self.lb.len()
    }

    /// Number of objectives
    pub fn num_objectives(&self) -> usize {
        self.nobj
    }

    /// Number of equality constraints
    pub fn num_eq_constraints(&self) -> usize {
        self.nec
    }

    /// Number of inequality constraints
    pub fn num_ineq_constraints(&self) -> usize {
        self.nic
    }

    /// Total number of constraints
    pub fn num_constraints(&self) -> usize {
        self.nec + self.nic
    }

    /// Length of the fitness vector: `nobj + nec + nic`
    pub fn fitness_dimension(&self) -> usize {
        self.nobj + self.nec + self.nic
    }

    /// Box bounds, as (lower, upper) slices
    pub fn bounds(&self) -> (&[f64], &[f64]) {
        (&self.lb, &self.ub)
    }

    /// Declared thread safety level, cached at construction
    pub fn thread_safety(&self) -> ThreadSafety {
        self.safety
    }

    /// Problem name
    pub fn name(&self) -> String {
        self.inner.name()
    }

    /// Whether a fitness vector satisfies every constraint
    ///
    /// Equality constraints must be exactly zero, inequality constraints
    /// non-positive.
    pub fn feasibility_f(&self, f: &[f64]) -> bool {
        let ec = &f[self.nobj..self.nobj + self.nec];
        let ic = &f[self.nobj + self.nec..];
        ec.iter().all(|&v| v == 0.0) && ic.iter().all(|&v| v <= 0.0)
    }
}

impl Clone for Problem {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_evaluator(),
            lb: self.lb.clone(),
            ub: self.ub.clone(),
            nobj: self.nobj,
            nec: self.nec,
            nic: self.nic,
            safety: self.safety,
        }
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name())
            .field("dimension", &self.dimension())
            .field("nobj", &self.nobj)
            .field("nec", &self.nec)
            .field("nic", &self.nic)
            .field("thread_safety", &self.safety)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PelagoError;
    use crate::problem::benchmarks::{HockSchittkowsky71, Sphere};

    struct BadBounds;

    impl Evaluator for BadBounds {
        fn fitness(&self, _x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
            Ok(vec![0.0])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![0.0, 1.0], vec![1.0])
        }

        fn clone_evaluator(&self) -> Box<dyn Evaluator> {
            Box::new(BadBounds)
        }
    }

    struct WrongFitnessLength;

    impl Evaluator for WrongFitnessLength {
        fn fitness(&self, _x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
            Ok(vec![0.0, 0.0])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![0.0], vec![1.0])
        }

        fn clone_evaluator(&self) -> Box<dyn Evaluator> {
            Box::new(WrongFitnessLength)
        }
    }

    #[test]
    fn test_problem_introspection() {
        let prob = Problem::new(Sphere::new(3)).unwrap();
        assert_eq!(prob.dimension(), 3);
        assert_eq!(prob.num_objectives(), 1);
        assert_eq!(prob.num_constraints(), 0);
        assert_eq!(prob.fitness_dimension(), 1);
        assert_eq!(prob.thread_safety(), ThreadSafety::Basic);
    }

    #[test]
    fn test_problem_rejects_mismatched_bounds() {
        let err = Problem::new(BadBounds).unwrap_err();
        assert!(matches!(err, PelagoError::Construction(_)));
    }

    #[test]
    fn test_problem_rejects_wrong_decision_length() {
        let prob = Problem::new(Sphere::new(3)).unwrap();
        let err = prob.fitness(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, EvaluationError::DecisionLength { .. }));
    }

    #[test]
    fn test_problem_rejects_wrong_fitness_length() {
        let prob = Problem::new(WrongFitnessLength).unwrap();
        let err = prob.fitness(&[0.5]).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::FitnessLength {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_problem_clone_is_independent() {
        let prob = Problem::new(Sphere::new(2)).unwrap();
        let copy = prob.clone();
        assert_eq!(copy.dimension(), prob.dimension());
        assert_eq!(
            copy.fitness(&[1.0, 2.0]).unwrap(),
            prob.fitness(&[1.0, 2.0]).unwrap()
        );
    }

    #[test]
    fn test_feasibility_f() {
        let prob = Problem::new(HockSchittkowsky71::new()).unwrap();
        // layout: [obj, ec, ic]
        assert!(prob.feasibility_f(&[10.0, 0.0, -1.0]));
        assert!(!prob.feasibility_f(&[10.0, 0.5, -1.0]));
        assert!(!prob.feasibility_f(&[10.0, 0.0, 2.0]));
    }
}
