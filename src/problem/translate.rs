//! Translation meta-problem
//!
//! Wraps a problem and shifts its decision space by a constant vector.

use crate::error::{EvaluationError, PelagoResult, ValidationError};
use crate::problem::benchmarks::NullProblem;
use crate::problem::traits::{Evaluator, IntoProblem};
use crate::problem::Problem;
use crate::safety::ThreadSafety;

/// A problem whose decision space is translated by a constant vector
///
/// For a translation `t`, the wrapped fitness is `f(x - t)` and the bounds
/// are shifted by `t`, so optima move by exactly `t`.
#[derive(Clone, Debug)]
pub struct Translate {
    inner: Problem,
    translation: Vec<f64>,
}

impl Translate {
    /// Wrap a problem (or raw evaluator) with a translation vector
    ///
    /// Fails with [`ValidationError`] if the translation length does not
    /// match the problem dimension or contains non-finite entries.
    pub fn new(prob: impl IntoProblem, translation: Vec<f64>) -> PelagoResult<Self> {
        let inner = prob.into_problem()?;
        if translation.len() != inner.dimension() {
            return Err(ValidationError::LengthMismatch {
                name: "translation",
                expected: inner.dimension(),
                actual: translation.len(),
            }
            .into());
        }
        if translation.iter().any(|t| !t.is_finite()) {
            return Err(ValidationError::OutOfRange {
                name: "translation",
                reason: "entries must be finite".to_string(),
            }
            .into());
        }
        Ok(Self { inner, translation })
    }

    /// The translation vector
    pub fn translation(&self) -> &[f64] {
        &self.translation
    }

    /// The wrapped problem
    pub fn inner(&self) -> &Problem {
        &self.inner
    }
}

impl Default for Translate {
    fn default() -> Self {
        Self {
            inner: NullProblem::new()
                .into_problem()
                .expect("null problem is always valid"),
            translation: vec![0.0],
        }
    }
}

impl Evaluator for Translate {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let shifted: Vec<f64> = x
            .iter()
            .zip(&self.translation)
            .map(|(xi, ti)| xi - ti)
            .collect();
        self.inner.fitness(&shifted)
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let (lb, ub) = self.inner.bounds();
        let lb = lb.iter().zip(&self.translation).map(|(b, t)| b + t).collect();
        let ub = ub.iter().zip(&self.translation).map(|(b, t)| b + t).collect();
        (lb, ub)
    }

    fn num_objectives(&self) -> usize {
        self.inner.num_objectives()
    }

    fn num_eq_constraints(&self) -> usize {
        self.inner.num_eq_constraints()
    }

    fn num_ineq_constraints(&self) -> usize {
        self.inner.num_ineq_constraints()
    }

    fn thread_safety(&self) -> ThreadSafety {
        self.inner.thread_safety()
    }

    fn name(&self) -> String {
        format!("{} [translated]", self.inner.name())
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}
