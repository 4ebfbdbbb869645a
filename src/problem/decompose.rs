//! Decomposition meta-problem
//!
//! Scalarizes an unconstrained multi-objective problem into a
//! single-objective one.

use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, PelagoResult, ValidationError};
use crate::problem::benchmarks::NullProblem;
use crate::problem::traits::{Evaluator, IntoProblem};
use crate::problem::Problem;
use crate::safety::ThreadSafety;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-8;
const BI_THETA: f64 = 5.0;

/// Scalarization method for [`Decompose`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecomposeMethod {
    /// Weighted sum of objectives
    Weighted,
    /// Weighted Tchebycheff distance from the reference point
    Tchebycheff,
    /// Boundary intersection with penalty
    BoundaryIntersection,
}

/// A multi-objective problem scalarized into a single objective
#[derive(Clone, Debug)]
pub struct Decompose {
    inner: Problem,
    weight: Vec<f64>,
    reference: Vec<f64>,
    method: DecomposeMethod,
}

impl Decompose {
    /// Wrap a problem (or raw evaluator) with a decomposition rule
    ///
    /// Fails with [`ValidationError`] if the inner problem is
    /// single-objective or constrained, if the weight or reference vector
    /// length does not equal the objective count, or if the weights are not
    /// positive and summing to one.
    pub fn new(
        prob: impl IntoProblem,
        weight: Vec<f64>,
        reference: Vec<f64>,
        method: DecomposeMethod,
    ) -> PelagoResult<Self> {
        let inner = prob.into_problem()?;
        let nobj = inner.num_objectives();
        if nobj < 2 {
            return Err(ValidationError::IncompatibleInner(
                "decomposition requires a multi-objective problem".to_string(),
            )
            .into());
        }
        if inner.num_constraints() > 0 {
            return Err(ValidationError::IncompatibleInner(
                "decomposition requires an unconstrained problem".to_string(),
            )
            .into());
        }
        if weight.len() != nobj {
            return Err(ValidationError::LengthMismatch {
                name: "weight",
                expected: nobj,
                actual: weight.len(),
            }
            .into());
        }
        if reference.len() != nobj {
            return Err(ValidationError::LengthMismatch {
                name: "reference",
                expected: nobj,
                actual: reference.len(),
            }
            .into());
        }
        if weight.iter().any(|&w| w <= 0.0) {
            return Err(ValidationError::InvalidWeights(
                "every weight must be strictly positive".to_string(),
            )
            .into());
        }
        let sum: f64 = weight.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidWeights(format!(
                "weights must sum to one, got {sum}"
            ))
            .into());
        }
        Ok(Self {
            inner,
            weight,
            reference,
            method,
        })
    }

    /// The wrapped problem
    pub fn inner(&self) -> &Problem {
        &self.inner
    }

    /// The scalarization method
    pub fn method(&self) -> DecomposeMethod {
        self.method
    }

    /// The original, unscalarized fitness of a decision vector
    pub fn original_fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        self.inner.fitness(x)
    }

    fn scalarize(&self, f: &[f64]) -> f64 {
        match self.method {
            DecomposeMethod::Weighted => {
                f.iter().zip(&self.weight).map(|(fi, wi)| fi * wi).sum()
            }
            DecomposeMethod::Tchebycheff => f
                .iter()
                .zip(&self.weight)
                .zip(&self.reference)
                .map(|((fi, wi), zi)| wi * (fi - zi).abs())
                .fold(f64::NEG_INFINITY, f64::max),
            DecomposeMethod::BoundaryIntersection => {
                let norm = self.weight.iter().map(|w| w * w).sum::<f64>().sqrt();
                let d1 = f
                    .iter()
                    .zip(&self.reference)
                    .zip(&self.weight)
                    .map(|((fi, zi), wi)| (fi - zi) * wi)
                    .sum::<f64>()
                    .abs()
                    / norm;
                let d2 = f
                    .iter()
                    .zip(&self.reference)
                    .zip(&self.weight)
                    .map(|((fi, zi), wi)| {
                        let proj = zi + d1 * wi / norm;
                        (fi - proj).powi(2)
                    })
                    .sum::<f64>()
                    .sqrt();
                d1 + BI_THETA * d2
            }
        }
    }
}

impl Default for Decompose {
    fn default() -> Self {
        let inner = NullProblem::with_arity(2, 0, 0)
            .expect("null problem arity is valid")
            .into_problem()
            .expect("null problem is always valid");
        Self {
            inner,
            weight: vec![0.5, 0.5],
            reference: vec![0.0, 0.0],
            method: DecomposeMethod::Weighted,
        }
    }
}

impl Evaluator for Decompose {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let f = self.inner.fitness(x)?;
        Ok(vec![self.scalarize(&f)])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let (lb, ub) = self.inner.bounds();
        (lb.to_vec(), ub.to_vec())
    }

    fn num_objectives(&self) -> usize {
        1
    }

    fn thread_safety(&self) -> ThreadSafety {
        self.inner.thread_safety()
    }

    fn name(&self) -> String {
        format!("{} [decomposed]", self.inner.name())
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PelagoError;
    use crate::problem::benchmarks::Sphere;

    /// Two-objective toy problem: f = (Σxᵢ², Σ(xᵢ-1)²)
    #[derive(Clone)]
    struct TwoSpheres;

    impl Evaluator for TwoSpheres {
        fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
            let f1 = x.iter().map(|xi| xi * xi).sum();
            let f2 = x.iter().map(|xi| (xi - 1.0).powi(2)).sum();
            Ok(vec![f1, f2])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![-5.0; 2], vec![5.0; 2])
        }

        fn num_objectives(&self) -> usize {
            2
        }

        fn thread_safety(&self) -> ThreadSafety {
            ThreadSafety::Basic
        }

        fn clone_evaluator(&self) -> Box<dyn Evaluator> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_decompose_weighted() {
        let d = Decompose::new(
            TwoSpheres,
            vec![0.5, 0.5],
            vec![0.0, 0.0],
            DecomposeMethod::Weighted,
        )
        .unwrap();
        // f(0,0) = (0, 2) -> 0.5*0 + 0.5*2 = 1
        assert_eq!(d.fitness(&[0.0, 0.0]).unwrap(), vec![1.0]);
        assert_eq!(d.num_objectives(), 1);
    }

    #[test]
    fn test_decompose_tchebycheff() {
        let d = Decompose::new(
            TwoSpheres,
            vec![0.5, 0.5],
            vec![0.0, 0.0],
            DecomposeMethod::Tchebycheff,
        )
        .unwrap();
        // f(0,0) = (0, 2) -> max(0.5*0, 0.5*2) = 1
        assert_eq!(d.fitness(&[0.0, 0.0]).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_decompose_rejects_single_objective() {
        let err = Decompose::new(
            Sphere::new(2),
            vec![1.0],
            vec![0.0],
            DecomposeMethod::Weighted,
        )
        .unwrap_err();
        assert!(matches!(err, PelagoError::Validation(_)));
    }

    #[test]
    fn test_decompose_rejects_bad_weights() {
        let err = Decompose::new(
            TwoSpheres,
            vec![0.9, 0.5],
            vec![0.0, 0.0],
            DecomposeMethod::Weighted,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Validation(ValidationError::InvalidWeights(_))
        ));

        let err = Decompose::new(
            TwoSpheres,
            vec![1.5, -0.5],
            vec![0.0, 0.0],
            DecomposeMethod::Weighted,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Validation(ValidationError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_decompose_rejects_wrong_weight_length() {
        let err = Decompose::new(
            TwoSpheres,
            vec![1.0],
            vec![0.0, 0.0],
            DecomposeMethod::Weighted,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Validation(ValidationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_decompose_default() {
        let d = Decompose::default();
        assert_eq!(d.method(), DecomposeMethod::Weighted);
        assert_eq!(d.fitness(&[0.5]).unwrap(), vec![0.0]);
    }
}
