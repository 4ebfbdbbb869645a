//! Benchmark problems
//!
//! This module provides standard benchmark evaluators used in tests and as
//! canonical defaults for meta-wrappers. All of them are pure functions and
//! declare basic thread safety.

use crate::error::{ConstructionError, EvaluationError, PelagoResult};
use crate::problem::traits::Evaluator;
use crate::safety::ThreadSafety;

/// Canonical do-nothing problem
///
/// One-dimensional with unit bounds, constant zero fitness, and a
/// configurable arity. Used as the default inner problem of meta-wrappers.
#[derive(Clone, Debug)]
pub struct NullProblem {
    nobj: usize,
    nec: usize,
    nic: usize,
}

impl NullProblem {
    /// Create a single-objective, unconstrained null problem
    pub fn new() -> Self {
        Self {
            nobj: 1,
            nec: 0,
            nic: 0,
        }
    }

    /// Create a null problem with the given arity
    pub fn with_arity(nobj: usize, nec: usize, nic: usize) -> PelagoResult<Self> {
        if nobj == 0 {
            return Err(ConstructionError::InvalidArgument {
                name: "nobj",
                reason: "at least one objective is required".to_string(),
            }
            .into());
        }
        Ok(Self { nobj, nec, nic })
    }
}

impl Default for NullProblem {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for NullProblem {
    fn fitness(&self, _x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        Ok(vec![0.0; self.nobj + self.nec + self.nic])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0], vec![1.0])
    }

    fn num_objectives(&self) -> usize {
        self.nobj
    }

    fn num_eq_constraints(&self) -> usize {
        self.nec
    }

    fn num_ineq_constraints(&self) -> usize {
        self.nic
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "null problem".to_string()
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Debug)]
pub struct Sphere {
    dimension: usize,
}

impl Sphere {
    /// Create a new Sphere function
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 1, "Sphere requires at least 1 dimension");
        Self { dimension }
    }
}

impl Evaluator for Sphere {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        Ok(vec![x.iter().map(|xi| xi * xi).sum()])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.12; self.dimension], vec![5.12; self.dimension])
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "sphere".to_string()
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Rosenbrock function: f(x) = Σ[100(xᵢ₊₁-xᵢ²)² + (1-xᵢ)²]
///
/// Valley structure, non-separable. Optimum at (1,1,...,1).
#[derive(Clone, Debug)]
pub struct Rosenbrock {
    dimension: usize,
}

impl Rosenbrock {
    /// Create a new Rosenbrock function
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 2, "Rosenbrock requires at least 2 dimensions");
        Self { dimension }
    }
}

impl Evaluator for Rosenbrock {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let value = x
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum();
        Ok(vec![value])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.0; self.dimension], vec![10.0; self.dimension])
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "rosenbrock".to_string()
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Rastrigin function: f(x) = 10n + Σ(xᵢ² - 10cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum at origin.
#[derive(Clone, Debug)]
pub struct Rastrigin {
    dimension: usize,
}

impl Rastrigin {
    /// Create a new Rastrigin function
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 1, "Rastrigin requires at least 1 dimension");
        Self { dimension }
    }
}

impl Evaluator for Rastrigin {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let a = 10.0;
        let n = x.len() as f64;
        let value = a * n
            + x.iter()
                .map(|xi| xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos())
                .sum::<f64>();
        Ok(vec![value])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.12; self.dimension], vec![5.12; self.dimension])
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "rastrigin".to_string()
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Hock-Schittkowsky problem 71
///
/// Four-dimensional, single-objective, with one equality and one inequality
/// constraint. The classic smoke test for constrained solvers.
#[derive(Clone, Debug, Default)]
pub struct HockSchittkowsky71;

impl HockSchittkowsky71 {
    /// Create a new instance
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for HockSchittkowsky71 {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let obj = x[0] * x[3] * (x[0] + x[1] + x[2]) + x[2];
        let ec = x.iter().map(|xi| xi * xi).sum::<f64>() - 40.0;
        let ic = 25.0 - x[0] * x[1] * x[2] * x[3];
        Ok(vec![obj, ec, ic])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![1.0; 4], vec![5.0; 4])
    }

    fn num_eq_constraints(&self) -> usize {
        1
    }

    fn num_ineq_constraints(&self) -> usize {
        1
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Basic
    }

    fn name(&self) -> String {
        "hock-schittkowsky 71".to_string()
    }

    fn clone_evaluator(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}
