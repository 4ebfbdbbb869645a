//! De-constraining meta-problem
//!
//! Lifts a constrained problem into an unconstrained one by folding
//! constraint violations into the objectives.

use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, PelagoResult, ValidationError};
use crate::problem::benchmarks::NullProblem;
use crate::problem::traits::{Evaluator, IntoProblem};
use crate::problem::Problem;
use crate::safety::ThreadSafety;

/// Constraint handling method for [`Unconstrain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnconstrainMethod {
    /// Infeasible individuals receive the worst possible objectives
    DeathPenalty,
    /// Death penalty graded by the number of satisfied constraints
    Kuri,
    /// Violations are added to each objective with fixed weights
    Weighted,
    /// Constraints are dropped entirely
    IgnoreC,
    /// Objectives are dropped; the violation norm becomes the objective
    IgnoreO,
}

/// A constrained problem lifted to an unconstrained one
#[derive(Clone, Debug)]
pub struct Unconstrain {
    inner: Problem,
    method: UnconstrainMethod,
    weights: Vec<f64>,
}

impl Unconstrain {
    /// Wrap a problem (or raw evaluator) with a constraint handling method
    ///
    /// Fails with [`ValidationError`] if the inner problem is already
    /// unconstrained, or if the weight vector is not sized to the constraint
    /// count for [`UnconstrainMethod::Weighted`] (and not empty for every
    /// other method).
    pub fn new(
        prob: impl IntoProblem,
        method: UnconstrainMethod,
        weights: Vec<f64>,
    ) -> PelagoResult<Self> {
        let inner = prob.into_problem()?;
        let nc = inner.num_constraints();
        if nc == 0 {
            return Err(ValidationError::IncompatibleInner(
                "the wrapped problem has no constraints".to_string(),
            )
            .into());
        }
        let expected = match method {
            UnconstrainMethod::Weighted => nc,
            _ => 0,
        };
        if weights.len() != expected {
            return Err(ValidationError::LengthMismatch {
                name: "weights",
                expected,
                actual: weights.len(),
            }
            .into());
        }
        Ok(Self {
            inner,
            method,
            weights,
        })
    }

    /// The wrapped problem
    pub fn inner(&self) -> &Problem {
        &self.inner
    }

    /// The constraint handling method
    pub fn method(&self) -> UnconstrainMethod {
        self.method
    }

    /// Violation magnitude of each constraint in a raw fitness vector
    fn violations(&self, f: &[f64]) -> Vec<f64> {
        let nobj = self.inner.num_objectives();
        let nec = self.inner.num_eq_constraints();
        let ec = &f[nobj..nobj + nec];
        let ic = &f[nobj + nec..];
        ec.iter()
            .map(|v| v.abs())
            .chain(ic.iter().map(|v| v.max(0.0)))
            .collect()
    }
}

impl Default for Unconstrain {
    fn default() -> Self {
        let inner = NullProblem::with_arity(2, 3, 4)
            .expect("null problem arity is valid")
            .into_problem()
            .expect("null problem is always valid");
        Self {
            inner,
            method: UnconstrainMethod::DeathPenalty,
            weights: Vec::new(),
        }
    }
}

impl Evaluator for Unconstrain {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let f = self.inner.fitness(x)?;
        let nobj = self.inner.num_objectives();
        let viol = self.violations(&f);
        let infeasible = viol.iter().any(|&v| v > 0.0);
        let out = match self.method {
            UnconstrainMethod::DeathPenalty => {
                if infeasible {
                    vec![f64::MAX; nobj]
                } else {
                    f[..nobj].to_vec()
                }
            }
            UnconstrainMethod::Kuri => {
                if infeasible {
                    let satisfied = viol.iter().filter(|&&v| v == 0.0).count();
                    let fraction = satisfied as f64 / viol.len() as f64;
                    vec![f64::MAX * (1.0 - fraction); nobj]
                } else {
                    f[..nobj].to_vec()
                }
            }
            UnconstrainMethod::Weighted => {
                let penalty: f64 = viol
                    .iter()
                    .zip(&self.weights)
                    .map(|(v, w)| v * w)
                    .sum();
                f[..nobj].iter().map(|fi| fi + penalty).collect()
            }
            UnconstrainMethod::IgnoreC => f[..nobj].to_vec(),
            UnconstrainMethod::IgnoreO => {
                let norm = viol.iter().map(|v| v * v).sum::<f64>().sqrt();
                vec![norm]
            }
        };
        Ok(out)
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let (lb, ub) = self.inner.bounds();
        (lb.to_vec(), ub.to_vec())
    }

    fn num_objectives(&self) -> usize {
        match self.method {
            UnconstrainMethod::IgnoreO => 1,
            _ => self.inner.num_objectives(),
        }
    }

    fn thread_safety(&self) -> ThreadSafety {
        self.inner.thread_safety()
    }

    fn name(&self) -> String {
        format!("{} [unconstrained]", self.inner.name())
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}
