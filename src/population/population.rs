//! Population type
//!
//! This module provides the population container: an ordered sequence of
//! individuals bound to one problem, plus the random generator that seeded
//! their decision vectors.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{EvaluationError, PelagoResult};
use crate::population::individual::Individual;
use crate::problem::traits::IntoProblem;
use crate::problem::Problem;

/// Feasibility-first comparison of two fitness vectors
///
/// Fitness layout is `[objective, equality constraints.., inequality
/// constraints..]`; only single-objective vectors are comparable. A feasible
/// vector beats any infeasible one; two infeasible vectors compare by
/// (violated constraint count, violation norm); two feasible vectors compare
/// by objective. Returns [`Ordering::Less`] when `f1` is better.
pub fn compare_fc(f1: &[f64], f2: &[f64], nec: usize, nic: usize) -> Ordering {
    let v1 = violation_stats(f1, nec, nic);
    let v2 = violation_stats(f2, nec, nic);
    match (v1.0 == 0, v2.0 == 0) {
        (true, true) => f1[0].partial_cmp(&f2[0]).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => v1
            .0
            .cmp(&v2.0)
            .then(v1.1.partial_cmp(&v2.1).unwrap_or(Ordering::Equal)),
    }
}

/// (violated constraint count, violation l2 norm) of a fitness vector
fn violation_stats(f: &[f64], nec: usize, nic: usize) -> (usize, f64) {
    let nobj = f.len() - nec - nic;
    let ec = &f[nobj..nobj + nec];
    let ic = &f[nobj + nec..];
    let magnitudes: Vec<f64> = ec
        .iter()
        .map(|v| v.abs())
        .chain(ic.iter().map(|v| v.max(0.0)))
        .collect();
    let count = magnitudes.iter().filter(|&&v| v > 0.0).count();
    let norm = magnitudes.iter().map(|v| v * v).sum::<f64>().sqrt();
    (count, norm)
}

/// A population of candidate solutions bound to one problem
///
/// The population owns its problem and its random generator; it provides no
/// internal locking. Concurrent safety comes from exclusive island
/// ownership, never from this type.
#[derive(Clone, Debug)]
pub struct Population {
    problem: Problem,
    individuals: Vec<Individual>,
    rng: StdRng,
    seed: u64,
    next_id: u64,
}

impl Population {
    /// Build a population of `size` random individuals
    ///
    /// Decision vectors are drawn uniformly within the problem bounds from a
    /// generator seeded with `seed`, or from system entropy when `seed` is
    /// `None`. Every individual is evaluated at construction.
    pub fn new(
        prob: impl IntoProblem,
        size: usize,
        seed: Option<u64>,
    ) -> PelagoResult<Self> {
        let problem = prob.into_problem()?;
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut pop = Self {
            problem,
            individuals: Vec::with_capacity(size),
            rng: StdRng::seed_from_u64(seed),
            seed,
            next_id: 0,
        };
        for _ in 0..size {
            let x = pop.random_decision_vector();
            pop.push_back(x)?;
        }
        Ok(pop)
    }

    /// The bound problem
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The seed the generator was constructed with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of individuals
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population holds no individuals
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by position
    pub fn get(&self, idx: usize) -> Option<&Individual> {
        self.individuals.get(idx)
    }

    /// Iterate over the individuals in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Decision vectors of all individuals, in order
    pub fn get_x(&self) -> Vec<Vec<f64>> {
        self.individuals.iter().map(|i| i.x.clone()).collect()
    }

    /// Fitness vectors of all individuals, in order
    pub fn get_f(&self) -> Vec<Vec<f64>> {
        self.individuals.iter().map(|i| i.f.clone()).collect()
    }

    /// Ids of all individuals, in order
    pub fn get_ids(&self) -> Vec<u64> {
        self.individuals.iter().map(|i| i.id).collect()
    }

    /// Draw a random decision vector within the problem bounds
    pub fn random_decision_vector(&mut self) -> Vec<f64> {
        let (lb, ub) = self.problem.bounds();
        lb.iter()
            .zip(ub)
            .map(|(&l, &u)| self.rng.gen_range(l..=u))
            .collect()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Append an individual, evaluating its fitness
    pub fn push_back(&mut self, x: Vec<f64>) -> PelagoResult<()> {
        let f = self.problem.fitness(&x)?;
        self.push_individual(x, f);
        Ok(())
    }

    /// Append an individual with a known fitness, skipping evaluation
    pub fn push_back_xf(&mut self, x: Vec<f64>, f: Vec<f64>) -> PelagoResult<()> {
        self.check_lengths(&x, &f)?;
        self.push_individual(x, f);
        Ok(())
    }

    /// Replace an individual's decision vector, recomputing its fitness
    ///
    /// The replacement is atomic: the fitness is computed first, and the
    /// individual is only touched once evaluation has succeeded. The id is
    /// preserved.
    pub fn set_x(&mut self, idx: usize, x: Vec<f64>) -> PelagoResult<()> {
        let f = self.problem.fitness(&x)?;
        self.set_xf_unchecked(idx, x, f)
    }

    /// Replace an individual's decision vector and fitness, skipping evaluation
    pub fn set_xf(&mut self, idx: usize, x: Vec<f64>, f: Vec<f64>) -> PelagoResult<()> {
        self.check_lengths(&x, &f)?;
        self.set_xf_unchecked(idx, x, f)
    }

    fn set_xf_unchecked(&mut self, idx: usize, x: Vec<f64>, f: Vec<f64>) -> PelagoResult<()> {
        let size = self.individuals.len();
        let ind = self.individuals.get_mut(idx).ok_or_else(|| {
            EvaluationError::Unsupported(format!(
                "individual index {idx} out of range for population of size {size}"
            ))
        })?;
        ind.x = x;
        ind.f = f;
        Ok(())
    }

    fn check_lengths(&self, x: &[f64], f: &[f64]) -> PelagoResult<()> {
        if x.len() != self.problem.dimension() {
            return Err(EvaluationError::DecisionLength {
                expected: self.problem.dimension(),
                actual: x.len(),
            }
            .into());
        }
        if f.len() != self.problem.fitness_dimension() {
            return Err(EvaluationError::FitnessLength {
                expected: self.problem.fitness_dimension(),
                actual: f.len(),
            }
            .into());
        }
        Ok(())
    }

    fn push_individual(&mut self, x: Vec<f64>, f: Vec<f64>) {
        let id = self.next_id;
        self.next_id += 1;
        self.individuals.push(Individual::new(id, x, f));
    }

    /// Position of the best individual under the problem ordering
    ///
    /// Feasibility first, then objective, tie-break by lowest id. Only
    /// defined for single-objective problems and non-empty populations.
    pub fn best_idx(&self) -> PelagoResult<usize> {
        self.extreme_idx(Ordering::Less)
    }

    /// Position of the worst individual under the problem ordering
    pub fn worst_idx(&self) -> PelagoResult<usize> {
        self.extreme_idx(Ordering::Greater)
    }

    fn extreme_idx(&self, want: Ordering) -> PelagoResult<usize> {
        if self.problem.num_objectives() != 1 {
            return Err(EvaluationError::Unsupported(
                "individual ranking is only defined for single-objective problems"
                    .to_string(),
            )
            .into());
        }
        if self.individuals.is_empty() {
            return Err(EvaluationError::EmptyPopulation.into());
        }
        let nec = self.problem.num_eq_constraints();
        let nic = self.problem.num_ineq_constraints();
        let mut best = 0;
        for idx in 1..self.individuals.len() {
            let cmp = compare_fc(
                &self.individuals[idx].f,
                &self.individuals[best].f,
                nec,
                nic,
            );
            let better = cmp == want
                || (cmp == Ordering::Equal
                    && self.individuals[idx].id < self.individuals[best].id);
            if better {
                best = idx;
            }
        }
        Ok(best)
    }

    /// The best individual under the problem ordering
    pub fn champion(&self) -> PelagoResult<&Individual> {
        let idx = self.best_idx()?;
        Ok(&self.individuals[idx])
    }

    /// Decision vector of the champion
    pub fn champion_x(&self) -> PelagoResult<Vec<f64>> {
        Ok(self.champion()?.x.clone())
    }

    /// Fitness vector of the champion
    pub fn champion_f(&self) -> PelagoResult<Vec<f64>> {
        Ok(self.champion()?.f.clone())
    }
}
